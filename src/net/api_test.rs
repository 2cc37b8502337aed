use super::*;
use crate::net::types::MemberData;

#[test]
fn select_member_path_formats_expected_path() {
    assert_eq!(select_member_path("m1"), "/members/m1/select");
}

#[test]
fn bearer_formats_authorization_value() {
    assert_eq!(bearer("abc"), "Bearer abc");
}

#[test]
fn gateway_endpoints_join_api_base() {
    let gateway = HttpGateway::new(ClientConfig::default());
    assert_eq!(gateway.config().endpoint(ME_PATH), "/api/auth/me");
    assert_eq!(gateway.config().endpoint(LOGIN_PATH), "/api/auth/login");
}

#[test]
fn decode_response_unwraps_data() {
    let body = r#"{"success":true,"data":{"member":{"id":"m1","name":"Hana"}}}"#;
    let data: MemberData = decode_response(200, body).unwrap();
    assert_eq!(data.member.unwrap().id, "m1");
}

#[test]
fn decode_response_maps_error_status_with_message() {
    let body = r#"{"success":false,"error":{"code":"UNAUTHORIZED","message":"認証が必要です"}}"#;
    let err = decode_response::<MemberData>(401, body).unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.server_message(), Some("認証が必要です"));
}

#[test]
fn decode_response_error_status_without_json_body() {
    let err = decode_response::<MemberData>(502, "Bad Gateway").unwrap_err();
    assert_eq!(err, ApiError::Status { status: 502, message: None });
}

#[test]
fn decode_response_rejects_missing_data() {
    let err = decode_response::<MemberData>(200, r#"{"success":true}"#).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn decode_response_rejects_malformed_json() {
    let err = decode_response::<MemberData>(200, "not json").unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn http_gateway_is_unavailable_off_browser() {
    let gateway = HttpGateway::new(ClientConfig::default());
    assert_eq!(gateway.me("t1").await.unwrap_err(), ApiError::Unavailable);
    assert_eq!(gateway.logout("t1").await.unwrap_err(), ApiError::Unavailable);
}
