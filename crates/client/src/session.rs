//! Logged-in session context.
//!
//! The bearer token is handed to each authenticated call explicitly. Nothing
//! in this crate reads identity from process-wide storage.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::{ConfigError, get_optional_env, get_required_env};
use crate::error::{NOT_LOGGED_IN_MESSAGE, SyncError};

/// Identity of a logged-in user.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct SessionContext {
    token: SecretString,
    username: Option<String>,
    balance: Option<i64>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("token", &"[REDACTED]")
            .field("username", &self.username)
            .field("balance", &self.balance)
            .finish()
    }
}

/// Successful response of `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
    pub username: Option<String>,
    pub balance: Option<i64>,
}

impl From<LoginResponse> for SessionContext {
    fn from(response: LoginResponse) -> Self {
        Self {
            token: SecretString::from(response.token),
            username: response.username,
            balance: response.balance,
        }
    }
}

impl SessionContext {
    /// Session for a bearer token obtained elsewhere.
    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            username: None,
            balance: None,
        }
    }

    /// Load the session from `CART_API_TOKEN` and the optional `CART_USERNAME`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if no token is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            token: SecretString::from(get_required_env("CART_API_TOKEN")?),
            username: get_optional_env("CART_USERNAME"),
            balance: None,
        })
    }

    /// Attach the username shown in the UI.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// The logged-in username, if known.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Wallet balance reported at login, if known.
    #[must_use]
    pub const fn balance(&self) -> Option<i64> {
        self.balance
    }

    /// The token to send as `Authorization: Bearer <token>`.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Auth` if the token is blank, so no request is sent
    /// for a session that was never logged in.
    pub fn bearer_token(&self) -> Result<&str, SyncError> {
        let token = self.token.expose_secret();
        if token.trim().is_empty() {
            return Err(SyncError::Auth(NOT_LOGGED_IN_MESSAGE.to_string()));
        }
        Ok(token)
    }

    /// Expose the raw token, e.g. to persist it after login.
    #[must_use]
    pub fn expose_token(&self) -> &str {
        self.token.expose_secret()
    }
}
