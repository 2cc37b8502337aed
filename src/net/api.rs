//! Auth gateway: the REST calls the session store depends on.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every call returns [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ApiError::Status`] carrying the envelope's
//! message. The gateway never navigates or touches storage on a 401; the
//! session store decides what an unauthorized response means.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
#[cfg(any(test, feature = "hydrate"))]
use serde::de::DeserializeOwned;

use super::error::ApiError;
#[cfg(any(test, feature = "hydrate"))]
use super::types::ApiEnvelope;
use super::types::{AuthPayload, Credentials, Member, SignupProfile, User};
use crate::config::ClientConfig;

/// Network operations backing the session store.
///
/// Futures are not `Send`: browser fetch handles are single-threaded.
#[async_trait(?Send)]
pub trait AuthGateway {
    /// Exchange credentials for a session token.
    async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, ApiError>;

    /// Register an account and open a session.
    async fn signup(&self, profile: &SignupProfile) -> Result<AuthPayload, ApiError>;

    /// Invalidate the token server-side. The response body is ignored.
    async fn logout(&self, token: &str) -> Result<(), ApiError>;

    /// Who the token belongs to.
    async fn me(&self, token: &str) -> Result<User, ApiError>;

    /// Make `member_id` the session's acting member.
    async fn select_member(&self, token: &str, member_id: &str) -> Result<Member, ApiError>;

    /// The session's acting member, if one is selected.
    async fn current_member(&self, token: &str) -> Result<Option<Member>, ApiError>;

    /// The family roster.
    async fn list_members(&self, token: &str) -> Result<Vec<Member>, ApiError>;
}

pub(crate) const LOGIN_PATH: &str = "/auth/login";
pub(crate) const SIGNUP_PATH: &str = "/auth/signup";
pub(crate) const LOGOUT_PATH: &str = "/auth/logout";
pub(crate) const ME_PATH: &str = "/auth/me";
pub(crate) const CURRENT_MEMBER_PATH: &str = "/members/current";
pub(crate) const MEMBERS_PATH: &str = "/members";

pub(crate) fn select_member_path(member_id: &str) -> String {
    format!("/members/{member_id}/select")
}

#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Turn a raw response into the envelope's `data`.
///
/// Split from the transport so status/envelope handling is testable off-browser.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status { status, message: super::types::error_message_from_body(body) });
    }
    let envelope: ApiEnvelope<T> = serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    envelope.data.ok_or_else(|| ApiError::Decode("response has no data".to_owned()))
}

/// [`AuthGateway`] over the JSON REST API.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    config: ClientConfig,
}

impl HttpGateway {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[cfg(feature = "hydrate")]
    async fn send<T: DeserializeOwned>(
        &self,
        method: gloo_net::http::Method,
        path: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        use gloo_net::http::RequestBuilder;

        let url = self.config.endpoint(path);
        let mut builder = RequestBuilder::new(&url)
            .method(method)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", &bearer(token));
        }
        let request = match body {
            Some(payload) => builder.json(&payload).map_err(|e| ApiError::Decode(e.to_string()))?,
            None => builder.build().map_err(|e| ApiError::Network(e.to_string()))?,
        };
        let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        decode_response(status, &text)
    }
}

#[async_trait(?Send)]
impl AuthGateway for HttpGateway {
    async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::to_value(credentials).map_err(|e| ApiError::Decode(e.to_string()))?;
            self.send(gloo_net::http::Method::POST, LOGIN_PATH, None, Some(payload)).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (credentials, LOGIN_PATH);
            Err(ApiError::Unavailable)
        }
    }

    async fn signup(&self, profile: &SignupProfile) -> Result<AuthPayload, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::to_value(profile).map_err(|e| ApiError::Decode(e.to_string()))?;
            self.send(gloo_net::http::Method::POST, SIGNUP_PATH, None, Some(payload)).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (profile, SIGNUP_PATH);
            Err(ApiError::Unavailable)
        }
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            self.send::<serde_json::Value>(gloo_net::http::Method::POST, LOGOUT_PATH, Some(token), None)
                .await
                .map(|_| ())
                .or_else(|e| match e {
                    // 2xx with an empty or data-less body still counts.
                    ApiError::Decode(_) => Ok(()),
                    other => Err(other),
                })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, LOGOUT_PATH);
            Err(ApiError::Unavailable)
        }
    }

    async fn me(&self, token: &str) -> Result<User, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let data: super::types::MeData =
                self.send(gloo_net::http::Method::GET, ME_PATH, Some(token), None).await?;
            Ok(data.user)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, ME_PATH);
            Err(ApiError::Unavailable)
        }
    }

    async fn select_member(&self, token: &str, member_id: &str) -> Result<Member, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let path = select_member_path(member_id);
            let data: super::types::MemberData =
                self.send(gloo_net::http::Method::POST, &path, Some(token), None).await?;
            data.member.ok_or_else(|| ApiError::Decode("select response has no member".to_owned()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, select_member_path(member_id));
            Err(ApiError::Unavailable)
        }
    }

    async fn current_member(&self, token: &str) -> Result<Option<Member>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let data: super::types::MemberData =
                self.send(gloo_net::http::Method::GET, CURRENT_MEMBER_PATH, Some(token), None).await?;
            Ok(data.member)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, CURRENT_MEMBER_PATH);
            Err(ApiError::Unavailable)
        }
    }

    async fn list_members(&self, token: &str) -> Result<Vec<Member>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let data: super::types::MembersData =
                self.send(gloo_net::http::Method::GET, MEMBERS_PATH, Some(token), None).await?;
            Ok(data.members)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, MEMBERS_PATH);
            Err(ApiError::Unavailable)
        }
    }
}
