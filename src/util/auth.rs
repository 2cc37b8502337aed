//! Route guard wiring for the router.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendering is gated by [`admits`]: the matched view only mounts when the
//! guard allows the current location. One effect owns every session-driven
//! navigation: store events queue a [`NavIntent`], and otherwise the guard
//! redirect for the current location applies. Keeping both in one place stops
//! a guest-route bounce from racing the post-login landing.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use super::guard::{GuardDecision, guard, landing_after_auth, redirect_param};
use crate::config::RoutePaths;
use crate::state::session::SessionState;
use crate::state::store::SessionEvent;

/// Navigation requested by a store event rather than by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavIntent {
    /// Login or signup succeeded.
    AfterAuth,
    /// The session ended (logout or rejected token).
    ToLogin,
}

impl NavIntent {
    pub fn from_event(event: &SessionEvent) -> Option<Self> {
        match event {
            SessionEvent::Authenticated => Some(Self::AfterAuth),
            SessionEvent::LoggedOut | SessionEvent::Invalidated => Some(Self::ToLogin),
            SessionEvent::Changed(_) => None,
        }
    }
}

/// Rebuild the navigation target from router location parts.
pub fn current_target(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() { pathname.to_owned() } else { format!("{pathname}?{search}") }
}

/// Where to send the user, if anywhere, for `target` in `state`.
pub fn next_navigation(
    intent: Option<NavIntent>,
    target: &str,
    state: &SessionState,
    routes: &RoutePaths,
) -> Option<String> {
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    match intent {
        Some(NavIntent::AfterAuth) => Some(landing_after_auth(state, redirect_param(query).as_deref(), routes)),
        Some(NavIntent::ToLogin) => (path != routes.login).then(|| routes.login.to_owned()),
        None => match guard(target, state, routes) {
            GuardDecision::Allow => None,
            GuardDecision::Redirect(to) => Some(to),
        },
    }
}

/// Whether the view for `target` may render in `state`.
///
/// Checked before anything mounts, so a guarded page never renders while the
/// redirect away from it is still pending.
pub fn admits(target: &str, state: &SessionState, routes: &RoutePaths) -> bool {
    guard(target, state, routes) == GuardDecision::Allow
}

/// Apply guard redirects and event-driven navigation once the session is ready.
pub fn install_route_guard<F>(
    session: RwSignal<SessionState>,
    ready: RwSignal<bool>,
    intent: RwSignal<Option<NavIntent>>,
    target: Memo<String>,
    routes: RoutePaths,
    navigate: F,
) where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if !ready.get() {
            return;
        }
        let pending = intent.get();
        if pending.is_some() {
            intent.update_untracked(|i| *i = None);
        }
        let state = session.get();
        let current = target.get();
        if let Some(destination) = next_navigation(pending, &current, &state, &routes) {
            navigate(&destination, NavigateOptions { replace: pending.is_none(), ..NavigateOptions::default() });
        }
    });
}
