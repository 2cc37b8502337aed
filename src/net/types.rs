//! Wire DTOs for the recipe API's auth and member endpoints.
//!
//! DESIGN
//! ======
//! Every JSON body is wrapped in [`ApiEnvelope`]; the inner `data` shapes
//! mirror the server records so persisted copies round-trip unchanged.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The authenticated account, as returned by `/auth/me` and login/signup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: String,
    pub email: String,
    /// Display name.
    pub name: String,
    /// Emoji or icon key shown as the avatar.
    #[serde(default)]
    pub avatar_icon: Option<String>,
    /// Family the account belongs to; absent until one is created or joined.
    #[serde(default)]
    pub family_id: Option<String>,
    /// Member the account is currently acting as.
    #[serde(default)]
    pub current_member_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A lightweight per-person profile inside a family.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar_icon: Option<String>,
    #[serde(default)]
    pub family_id: Option<String>,
    /// Account linked to this member, if any.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub is_account_linked: bool,
}

/// Login request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Signup request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignupProfile {
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub name: String,
}

/// Successful login/signup payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub current_member: Option<Member>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MeData {
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MemberData {
    #[serde(default)]
    pub member: Option<Member>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MembersData {
    #[serde(default)]
    pub members: Vec<Member>,
}

/// Structured error body nested in a failed envelope.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

/// Response envelope shared by every endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

impl<T> ApiEnvelope<T> {
    /// Human-readable failure reason: `error.message`, then `message`.
    pub fn message(&self) -> Option<&str> {
        let usable = |m: &&str| !m.trim().is_empty();
        self.error
            .as_ref()
            .map(|e| e.message.as_str())
            .filter(usable)
            .or_else(|| self.message.as_deref().filter(usable))
    }
}

/// Extract the failure message from a raw error response body, if any.
pub fn error_message_from_body(body: &str) -> Option<String> {
    let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(body).ok()?;
    envelope.message().map(str::to_owned)
}
