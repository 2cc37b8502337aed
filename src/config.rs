//! Client configuration resolved at build time.
//!
//! SYSTEM CONTEXT
//! ==============
//! A WASM bundle has no process environment, so values come from
//! `option_env!` when the bundle is compiled and fall back to defaults that
//! match the API server's standard mount point.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE: &str = "/api";

/// Route paths the session layer redirects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePaths {
    pub login: &'static str,
    pub signup: &'static str,
    pub member_select: &'static str,
    pub home: &'static str,
}

impl Default for RoutePaths {
    fn default() -> Self {
        Self { login: "/login", signup: "/signup", member_select: "/member-select", home: "/" }
    }
}

/// Localized generic messages used when the server gives no usable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackMessages {
    pub login: &'static str,
    pub signup: &'static str,
    pub select_member: &'static str,
    pub missing_credentials: &'static str,
    pub missing_member: &'static str,
    pub not_authenticated: &'static str,
}

impl Default for FallbackMessages {
    fn default() -> Self {
        Self {
            login: "ログインに失敗しました",
            signup: "登録に失敗しました",
            select_member: "メンバーの選択に失敗しました",
            missing_credentials: "メールアドレスとパスワードを入力してください",
            missing_member: "メンバーを選択してください",
            not_authenticated: "ログインが必要です",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every gateway path is joined onto, without a trailing slash.
    pub api_base: String,
    pub routes: RoutePaths,
    pub messages: FallbackMessages,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_base: DEFAULT_API_BASE.to_owned(), routes: RoutePaths::default(), messages: FallbackMessages::default() }
    }
}

impl ClientConfig {
    /// Build config from compile-time environment variables.
    ///
    /// Optional:
    /// - `FAMILY_API_BASE`: API mount point (default `/api`)
    pub fn from_build_env() -> Self {
        Self { api_base: normalize_api_base(option_env!("FAMILY_API_BASE")), ..Self::default() }
    }

    /// Join a gateway path (leading `/`) onto the API base.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }
}

fn normalize_api_base(raw: Option<&str>) -> String {
    let trimmed = raw.map(str::trim).unwrap_or_default().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_API_BASE.to_owned();
    }
    trimmed.to_owned()
}
