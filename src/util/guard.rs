//! Route classification and the navigation guard decision.
//!
//! DESIGN
//! ======
//! The guard is a pure function of the target path, its [`RouteMeta`] and an
//! already-hydrated [`SessionState`]. It performs no I/O; the Leptos glue in
//! `util::auth` applies its decision.
//!
//! Policy, evaluated in order:
//! 1. guest route while authenticated: member selection when the family has
//!    members but none is selected, otherwise home;
//! 2. auth route while unauthenticated: login with `?redirect=<target>`;
//! 3. member route while authenticated without a member: member selection;
//! 4. otherwise allow. Unknown paths (the not-found page) are unclassified.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::config::RoutePaths;
use crate::state::session::SessionState;

/// Access requirements attached to a route. All false means public.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_member: bool,
    /// Only reachable while logged out (login, signup).
    pub guest: bool,
}

impl RouteMeta {
    pub const PUBLIC: Self = Self { requires_auth: false, requires_member: false, guest: false };
    pub const GUEST: Self = Self { requires_auth: false, requires_member: false, guest: true };
    pub const AUTH: Self = Self { requires_auth: true, requires_member: false, guest: false };
    pub const MEMBER: Self = Self { requires_auth: true, requires_member: true, guest: false };
}

/// A declared route: path pattern (`:name` matches one segment) plus meta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub name: &'static str,
    pub pattern: &'static str,
    pub meta: RouteMeta,
}

const ROUTES: &[RouteDef] = &[
    RouteDef { name: "home", pattern: "/", meta: RouteMeta::MEMBER },
    RouteDef { name: "login", pattern: "/login", meta: RouteMeta::GUEST },
    RouteDef { name: "signup", pattern: "/signup", meta: RouteMeta::GUEST },
    RouteDef { name: "member-select", pattern: "/member-select", meta: RouteMeta::AUTH },
    RouteDef { name: "recipes", pattern: "/recipes", meta: RouteMeta::MEMBER },
    RouteDef { name: "recipe-detail", pattern: "/recipes/:id", meta: RouteMeta::MEMBER },
    RouteDef { name: "meal-plans", pattern: "/meal-plans", meta: RouteMeta::MEMBER },
    RouteDef { name: "requests", pattern: "/requests", meta: RouteMeta::MEMBER },
    RouteDef { name: "members", pattern: "/members", meta: RouteMeta::MEMBER },
    RouteDef { name: "settings", pattern: "/settings", meta: RouteMeta::MEMBER },
];

pub fn route_table() -> &'static [RouteDef] {
    ROUTES
}

/// Outcome of guarding one navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

/// Look up the meta for `target` (query and fragment ignored).
///
/// Paths matching no declared route get [`RouteMeta::PUBLIC`].
pub fn classify(target: &str) -> RouteMeta {
    let path = path_only(target);
    ROUTES
        .iter()
        .find(|route| pattern_matches(route.pattern, path))
        .map_or(RouteMeta::PUBLIC, |route| route.meta)
}

/// Guard a navigation to `target` using the declared route table.
pub fn guard(target: &str, state: &SessionState, routes: &RoutePaths) -> GuardDecision {
    decide(target, classify(target), state, routes)
}

/// Decide a navigation to `target` carrying `meta`.
pub fn decide(target: &str, meta: RouteMeta, state: &SessionState, routes: &RoutePaths) -> GuardDecision {
    let authenticated = state.is_authenticated();

    if meta.guest && authenticated {
        let landing = if state.has_members() && !state.has_selected_member() {
            routes.member_select
        } else {
            routes.home
        };
        return redirect_unless_here(target, landing);
    }

    if meta.requires_auth && !authenticated {
        return GuardDecision::Redirect(login_redirect(routes, target));
    }

    if meta.requires_member && authenticated && !state.has_selected_member() {
        return redirect_unless_here(target, routes.member_select);
    }

    GuardDecision::Allow
}

/// Where to go once login or signup succeeds.
///
/// Without an acting member the user must pick one first; the intended path
/// rides along so member selection can continue to it.
pub fn landing_after_auth(state: &SessionState, redirect: Option<&str>, routes: &RoutePaths) -> String {
    if !state.is_authenticated() {
        return routes.login.to_owned();
    }
    let redirect = redirect.filter(|path| is_resumable(path, routes));
    if !state.has_selected_member() {
        return match redirect {
            Some(path) => format!("{}?redirect={}", routes.member_select, encode_query_value(path)),
            None => routes.member_select.to_owned(),
        };
    }
    redirect.map_or_else(|| routes.home.to_owned(), str::to_owned)
}

/// `/login?redirect=<target>`.
pub fn login_redirect(routes: &RoutePaths, target: &str) -> String {
    format!("{}?redirect={}", routes.login, encode_query_value(target))
}

/// Pull the decoded `redirect` value out of a query string (with or without `?`).
pub fn redirect_param(query: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "redirect")
        .and_then(|(_, value)| decode_query_value(value))
        .filter(|value| !value.is_empty())
}

/// Percent-encode a query value, keeping `/` and `:` readable.
pub fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' | b':' | b'@' => {
                out.push(char::from(byte));
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Reverse of [`encode_query_value`]; also maps `+` to space. `None` on
/// malformed escapes or invalid UTF-8.
pub fn decode_query_value(value: &str) -> Option<String> {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = value.get(i + 1..i + 3)?;
                out.push(u8::from_str_radix(hex, 16).ok()?);
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8(out).ok()
}

fn redirect_unless_here(target: &str, destination: &str) -> GuardDecision {
    if path_only(target) == path_only(destination) {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(destination.to_owned())
    }
}

/// Same-origin absolute path that is worth returning to after login.
fn is_resumable(path: &str, routes: &RoutePaths) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !classify(path).guest
        && path_only(path) != routes.member_select
}

fn path_only(target: &str) -> &str {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    &target[..end]
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(expected), Some(actual)) => {
                let matched = if expected.starts_with(':') { !actual.is_empty() } else { expected == actual };
                if !matched {
                    return false;
                }
            }
            _ => return false,
        }
    }
}
