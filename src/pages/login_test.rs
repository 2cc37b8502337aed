use super::*;

#[test]
fn validate_login_input_trims_email() {
    assert_eq!(
        validate_login_input("  aiko@example.com ", "secret", &FallbackMessages::default()),
        Ok(("aiko@example.com".to_owned(), "secret".to_owned()))
    );
}

#[test]
fn validate_login_input_requires_both_fields() {
    let messages = FallbackMessages::default();
    assert_eq!(validate_login_input("   ", "secret", &messages), Err(messages.missing_credentials));
    assert_eq!(validate_login_input("aiko@example.com", "", &messages), Err(messages.missing_credentials));
}

#[test]
fn validate_login_input_reports_configured_message() {
    let messages = FallbackMessages { missing_credentials: "email and password required", ..FallbackMessages::default() };
    assert_eq!(validate_login_input("", "", &messages), Err("email and password required"));
}

#[test]
fn validate_login_input_keeps_password_whitespace() {
    let messages = FallbackMessages::default();
    assert_eq!(validate_login_input("a@b.c", " pw ", &messages).map(|(_, p)| p), Ok(" pw ".to_owned()));
}
