use super::*;

#[test]
fn normalize_api_base_defaults_when_missing_or_blank() {
    assert_eq!(normalize_api_base(None), "/api");
    assert_eq!(normalize_api_base(Some("   ")), "/api");
    assert_eq!(normalize_api_base(Some("/")), "/api");
}

#[test]
fn normalize_api_base_trims_trailing_slashes() {
    assert_eq!(normalize_api_base(Some("https://kitchen.example.com/api/")), "https://kitchen.example.com/api");
}

#[test]
fn endpoint_joins_path_onto_base() {
    let config = ClientConfig::default();
    assert_eq!(config.endpoint("/auth/me"), "/api/auth/me");
}

#[test]
fn default_routes_match_router_paths() {
    let routes = RoutePaths::default();
    assert_eq!(routes.login, "/login");
    assert_eq!(routes.member_select, "/member-select");
    assert_eq!(routes.home, "/");
}
