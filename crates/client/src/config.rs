//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CART_API_ENDPOINT` - Base URL of the cart backend (e.g., `http://localhost:8082/api/v1`)
//!
//! ## Optional
//! - `CART_API_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `CART_CATALOG_CACHE_SECS` - How long the product catalog is cached (default: 300)

use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CATALOG_CACHE_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart backend client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the cart backend
    pub endpoint: Url,
    /// Timeout applied to every backend request
    pub timeout: Duration,
    /// Time-to-live of the cached product catalog
    pub catalog_cache_ttl: Duration,
}

impl ClientConfig {
    /// Configuration for `endpoint` with default timeouts.
    #[must_use]
    pub const fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            catalog_cache_ttl: Duration::from_secs(DEFAULT_CATALOG_CACHE_SECS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let endpoint = parse_endpoint("CART_API_ENDPOINT", &get_required_env("CART_API_ENDPOINT")?)?;
        let timeout = get_secs_or_default("CART_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout.is_zero() {
            return Err(ConfigError::InvalidEnvVar(
                "CART_API_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let catalog_cache_ttl =
            get_secs_or_default("CART_CATALOG_CACHE_SECS", DEFAULT_CATALOG_CACHE_SECS)?;

        Ok(Self {
            endpoint,
            timeout,
            catalog_cache_ttl,
        })
    }

    /// Full URL of a backend route, e.g. `cart` or `auth/login`.
    #[must_use]
    pub fn route(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
pub(crate) fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
pub(crate) fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get a duration in whole seconds with a default value.
fn get_secs_or_default(key: &str, default: u64) -> Result<Duration, ConfigError> {
    get_optional_env(key).map_or(Ok(Duration::from_secs(default)), |value| {
        value
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse and check a backend base URL.
fn parse_endpoint(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}' (expected http or https)", url.scheme()),
        ));
    }

    Ok(url)
}
