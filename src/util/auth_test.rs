use super::*;
use crate::state::test_helpers::{member, user};

fn state(current: Option<&str>) -> SessionState {
    SessionState {
        token: Some("t1".to_owned()),
        user: Some(user()),
        members: vec![member("m1")],
        current_member: current.map(member),
        ..SessionState::default()
    }
}

#[test]
fn current_target_joins_search() {
    assert_eq!(current_target("/login", ""), "/login");
    assert_eq!(current_target("/login", "?redirect=/recipes"), "/login?redirect=/recipes");
    assert_eq!(current_target("/login", "redirect=/recipes"), "/login?redirect=/recipes");
}

#[test]
fn intent_from_events() {
    assert_eq!(NavIntent::from_event(&SessionEvent::Authenticated), Some(NavIntent::AfterAuth));
    assert_eq!(NavIntent::from_event(&SessionEvent::LoggedOut), Some(NavIntent::ToLogin));
    assert_eq!(NavIntent::from_event(&SessionEvent::Invalidated), Some(NavIntent::ToLogin));
    assert_eq!(NavIntent::from_event(&SessionEvent::Changed(SessionState::default())), None);
}

#[test]
fn after_auth_intent_lands_on_member_select_with_redirect() {
    let routes = RoutePaths::default();
    let next = next_navigation(Some(NavIntent::AfterAuth), "/login?redirect=/recipes", &state(None), &routes);
    assert_eq!(next.as_deref(), Some("/member-select?redirect=/recipes"));
}

#[test]
fn after_auth_intent_with_member_resumes_redirect() {
    let routes = RoutePaths::default();
    let next = next_navigation(Some(NavIntent::AfterAuth), "/login?redirect=/meal-plans", &state(Some("m1")), &routes);
    assert_eq!(next.as_deref(), Some("/meal-plans"));
}

#[test]
fn to_login_intent_skips_when_already_on_login() {
    let routes = RoutePaths::default();
    let cleared = SessionState::default();
    assert_eq!(next_navigation(Some(NavIntent::ToLogin), "/recipes", &cleared, &routes).as_deref(), Some("/login"));
    assert_eq!(next_navigation(Some(NavIntent::ToLogin), "/login?redirect=/x", &cleared, &routes), None);
}

#[test]
fn no_intent_applies_guard() {
    let routes = RoutePaths::default();
    let anonymous = SessionState::default();
    assert_eq!(
        next_navigation(None, "/recipes", &anonymous, &routes).as_deref(),
        Some("/login?redirect=/recipes")
    );
    assert_eq!(next_navigation(None, "/recipes", &state(Some("m1")), &routes), None);
}

#[test]
fn admits_blocks_guarded_views_until_allowed() {
    let routes = RoutePaths::default();
    let anonymous = SessionState::default();
    assert!(!admits("/", &anonymous, &routes));
    assert!(!admits("/recipes/r1", &anonymous, &routes));
    assert!(admits("/login", &anonymous, &routes));
    assert!(admits("/no-such-page", &anonymous, &routes));

    assert!(!admits("/", &state(None), &routes));
    assert!(admits("/member-select", &state(None), &routes));
    assert!(admits("/", &state(Some("m1")), &routes));
    assert!(!admits("/login", &state(Some("m1")), &routes));
}
