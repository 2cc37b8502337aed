//! Error and outcome types for gateway calls and session operations.
//!
//! ERROR HANDLING
//! ==============
//! Only user-input-driven operations (login, signup, member selection) return
//! `Err(AuthFailure)`. Session-maintenance operations report a
//! [`SessionOutcome`] instead, so an absorbed failure is visible to callers
//! without ever being raised.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure of a single gateway request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, aborted).
    #[error("request failed: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("server responded {status}")]
    Status { status: u16, message: Option<String> },

    /// The response body did not match the expected envelope.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// HTTP is only available in the browser build.
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Whether the server rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// Human-readable message from the server's structured error body.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message: Some(message), .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Server message, or `fallback` when the server gave none.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }
}

/// A rejected login, signup or member selection.
///
/// The display text is ready to show to the user; `Rejected` keeps the
/// transport detail in `cause`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    /// Input was refused before any request was sent.
    #[error("{0}")]
    InvalidInput(String),

    /// The gateway refused the request.
    #[error("{message}")]
    Rejected {
        message: String,
        #[source]
        cause: ApiError,
    },
}

impl AuthFailure {
    pub fn rejected(cause: ApiError, fallback: &str) -> Self {
        Self::Rejected { message: cause.user_message(fallback), cause }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(message) | Self::Rejected { message, .. } => message,
        }
    }

    pub fn cause(&self) -> Option<&ApiError> {
        match self {
            Self::InvalidInput(_) => None,
            Self::Rejected { cause, .. } => Some(cause),
        }
    }
}

/// Result of a session-maintenance operation.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The gateway answered and state was updated.
    Applied,
    /// No token held; nothing was sent.
    Skipped,
    /// The call failed, was logged, and state was left in its documented
    /// fallback condition.
    Absorbed(ApiError),
    /// The failure was treated as an invalid token and the session was cleared.
    Invalidated(ApiError),
}

impl SessionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn is_invalidated(&self) -> bool {
        matches!(self, Self::Invalidated(_))
    }
}
