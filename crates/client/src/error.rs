//! Errors raised while talking to the cart backend.
//!
//! Callers branch on the error kind: [`SyncError::Auth`] means the user must
//! log in again, [`SyncError::is_transient`] errors can be retried by the user,
//! and everything else should be shown and left alone. Nothing here is retried
//! automatically.

use reqwest::StatusCode;
use serde::Deserialize;
use storefront_cart_core::ValidationError;
use thiserror::Error;

/// Message shown when the backend gave no usable explanation.
pub const BACKEND_UNREACHABLE_MESSAGE: &str = "Could not reach the cart backend. Check that the backend is running, reachable and returns valid JSON.";

/// Message shown when a session has no usable token.
pub const NOT_LOGGED_IN_MESSAGE: &str = "You must be logged in to access the cart";

/// Error payload returned by the backend on failure.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

/// Errors that can occur when synchronizing with the cart backend.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Caller input was rejected before any request was sent.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The token is missing, invalid or expired.
    #[error("Unauthorized: {0}")]
    Auth(String),

    /// The backend refused the request (4xx other than 401/403).
    #[error("Rejected with HTTP {status}: {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Backend-supplied explanation.
        message: String,
    },

    /// The backend failed to process the request (5xx).
    #[error("Backend error: {0}")]
    Transient(String),

    /// HTTP request failed (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a body that is not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SyncError {
    /// Classify a non-success response.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .map(|b| b.message)
            .filter(|m| !m.trim().is_empty());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Self::Auth(message.unwrap_or_else(|| NOT_LOGGED_IN_MESSAGE.to_string()))
            }
            s if s.is_client_error() => Self::Rejected {
                status: s.as_u16(),
                message: message.unwrap_or_else(|| format!("request rejected ({s})")),
            },
            _ => Self::Transient(message.unwrap_or_else(|| BACKEND_UNREACHABLE_MESSAGE.to_string())),
        }
    }

    /// Whether the user should be sent to log in again.
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Whether a user-initiated retry may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_) | Self::Http(_) | Self::Parse(_))
    }

    /// Human-readable message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Auth(message) | Self::Transient(message) | Self::Rejected { message, .. } => {
                message.clone()
            }
            Self::Http(_) | Self::Parse(_) => BACKEND_UNREACHABLE_MESSAGE.to_string(),
        }
    }
}

/// Result type alias for `SyncError`.
pub type Result<T> = std::result::Result<T, SyncError>;
