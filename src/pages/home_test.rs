use super::*;
use crate::state::test_helpers::{member, user};

#[test]
fn greeting_prefers_acting_member() {
    let state = SessionState {
        token: Some("t1".to_owned()),
        user: Some(user()),
        current_member: Some(member("m1")),
        ..SessionState::default()
    };
    assert_eq!(greeting(&state), "こんにちは、member m1さん");
}

#[test]
fn greeting_falls_back_to_account_name() {
    let state = SessionState { token: Some("t1".to_owned()), user: Some(user()), ..SessionState::default() };
    assert_eq!(greeting(&state), "こんにちは、Aikoさん");
}

#[test]
fn greeting_without_identity() {
    assert_eq!(greeting(&SessionState::default()), "こんにちは");
}
