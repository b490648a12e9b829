//! Cart backend client implementation.
//!
//! Uses `reqwest` for HTTP. Caches the product catalog using `moka`.
//!
//! The backend exposes one cart mutation: `POST /cart` with the desired
//! absolute quantity of a single product. Increment and decrement are computed
//! locally and sent through that same call. The response is the complete
//! updated cart, which replaces whatever the caller held before.

mod cache;
pub mod types;

use std::sync::Arc;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use storefront_cart_core::{CartEntry, CartLineItem, Product, ProductId, Quantity};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::SyncError;
use crate::session::{LoginResponse, SessionContext};

use cache::{CacheKey, CachedCatalog};
use types::{LoginRequest, SetQuantityRequest};

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest slice of a response body included in logs.
const LOGGED_BODY_CHARS: usize = 500;

// =============================================================================
// CartApi
// =============================================================================

/// Client for the cart backend.
///
/// Cheap to clone; clones share the HTTP connection pool and catalog cache.
#[derive(Clone)]
pub struct CartApi {
    inner: Arc<CartApiInner>,
}

struct CartApiInner {
    client: reqwest::Client,
    config: ClientConfig,
    cache: Cache<CacheKey, CachedCatalog>,
}

impl CartApi {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(config.catalog_cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(CartApiInner {
                client,
                config: config.clone(),
                cache,
            }),
        })
    }

    /// Send a request and decode a successful JSON response.
    ///
    /// Every request carries a fresh `x-request-id` so backend logs can be
    /// correlated with ours.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, SyncError> {
        let request_id = Uuid::new_v4().to_string();
        debug!(request_id = %request_id, "Sending cart backend request");

        let response = request
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await
            .inspect_err(|e| {
                tracing::warn!(request_id = %request_id, error = %e, "Cart backend unreachable");
            })?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            let err = SyncError::from_response(status, &response_text);
            if err.is_auth() {
                tracing::warn!(request_id = %request_id, status = %status, "Cart backend rejected credentials");
            } else {
                tracing::error!(
                    request_id = %request_id,
                    status = %status,
                    body = %truncate(&response_text),
                    "Cart backend returned non-success status"
                );
            }
            return Err(err);
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                request_id = %request_id,
                error = %e,
                body = %truncate(&response_text),
                "Failed to parse cart backend response"
            );
            SyncError::Parse(e)
        })
    }

    // =========================================================================
    // Cart Methods
    // =========================================================================

    /// Set the absolute quantity of one product in the user's cart.
    ///
    /// A quantity of zero removes the product. The returned entries are the
    /// backend's complete, authoritative cart; callers must replace their
    /// local cart with it rather than merge. This method changes no local
    /// state.
    ///
    /// # Errors
    ///
    /// - [`SyncError::Validation`] if the product id is malformed (no request sent)
    /// - [`SyncError::Auth`] if the session has no token or the backend rejects it
    /// - [`SyncError::Rejected`] if the backend refuses the change
    /// - [`SyncError::Transient`], [`SyncError::Http`] or [`SyncError::Parse`] on
    ///   server or network failure
    #[instrument(skip(self, session), fields(product_id = %product_id, qty = %qty))]
    pub async fn set_quantity(
        &self,
        session: &SessionContext,
        product_id: &ProductId,
        qty: Quantity,
    ) -> Result<Vec<CartEntry>, SyncError> {
        product_id.validate()?;
        let token = session.bearer_token()?;

        let request = self
            .inner
            .client
            .post(self.inner.config.route("cart"))
            .bearer_auth(token)
            .json(&SetQuantityRequest { product_id, qty });

        let cart: Vec<CartEntry> = self.send(request).await?;
        debug!(entries = cart.len(), "Cart updated");
        Ok(cart)
    }

    /// Add one unit of a line item's product.
    ///
    /// # Errors
    ///
    /// See [`CartApi::set_quantity`].
    pub async fn increment(
        &self,
        session: &SessionContext,
        item: &CartLineItem,
    ) -> Result<Vec<CartEntry>, SyncError> {
        self.set_quantity(session, &item.product_id, item.qty.increment())
            .await
    }

    /// Remove one unit of a line item's product, never going below zero.
    ///
    /// # Errors
    ///
    /// See [`CartApi::set_quantity`].
    pub async fn decrement(
        &self,
        session: &SessionContext,
        item: &CartLineItem,
    ) -> Result<Vec<CartEntry>, SyncError> {
        self.set_quantity(session, &item.product_id, item.qty.decrement())
            .await
    }

    /// Get the user's current cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not logged in or the request fails.
    #[instrument(skip(self, session))]
    pub async fn fetch_cart(&self, session: &SessionContext) -> Result<Vec<CartEntry>, SyncError> {
        let token = session.bearer_token()?;

        let request = self
            .inner
            .client
            .get(self.inner.config.route("cart"))
            .bearer_auth(token);

        self.send(request).await
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// Get the full product catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn fetch_catalog(&self) -> Result<Arc<Vec<Product>>, SyncError> {
        if let Some(catalog) = self.inner.cache.get(&CacheKey::Catalog).await {
            debug!("Cache hit for catalog");
            return Ok(catalog);
        }

        let request = self.inner.client.get(self.inner.config.route("products"));
        let catalog: Arc<Vec<Product>> = Arc::new(self.send(request).await?);
        debug!(products = catalog.len(), "Catalog loaded");

        self.inner
            .cache
            .insert(CacheKey::Catalog, Arc::clone(&catalog))
            .await;

        Ok(catalog)
    }

    /// Drop the cached catalog so the next read goes to the backend.
    pub async fn invalidate_catalog(&self) {
        self.inner.cache.invalidate(&CacheKey::Catalog).await;
    }

    // =========================================================================
    // Auth Methods
    // =========================================================================

    /// Log in and obtain a session.
    ///
    /// # Errors
    ///
    /// - [`SyncError::Auth`] if a field is empty or the backend rejects the credentials
    /// - [`SyncError::Transient`], [`SyncError::Http`] or [`SyncError::Parse`] on
    ///   server or network failure
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionContext, SyncError> {
        if username.is_empty() {
            return Err(SyncError::Auth("Username is a required field".to_string()));
        }
        if password.is_empty() {
            return Err(SyncError::Auth("Password is a required field".to_string()));
        }

        let request = self
            .inner
            .client
            .post(self.inner.config.route("auth/login"))
            .json(&LoginRequest { username, password });

        // The login endpoint reports bad credentials as HTTP 400.
        let response: LoginResponse = self.send(request).await.map_err(|err| match err {
            SyncError::Rejected { status: 400, message } => SyncError::Auth(message),
            other => other,
        })?;

        debug!("Logged in");
        Ok(SessionContext::from(response))
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(LOGGED_BODY_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;

    use super::*;

    fn api() -> CartApi {
        CartApi::new(&ClientConfig::new(
            Url::parse("http://127.0.0.1:9/api/v1").unwrap(),
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn test_set_quantity_validates_before_sending() {
        let session = SessionContext::from_token("token");
        let err = api()
            .set_quantity(&session, &ProductId::new("bad id"), Quantity::new(1))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Validation(_)));
    }

    #[tokio::test]
    async fn test_set_quantity_requires_token() {
        let session = SessionContext::from_token("");
        let err = api()
            .set_quantity(&session, &ProductId::new("a"), Quantity::new(1))
            .await
            .unwrap_err();
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn test_login_requires_fields() {
        let err = api().login("", "secret").await.unwrap_err();
        assert_eq!(err.user_message(), "Username is a required field");

        let err = api().login("shopper", "").await.unwrap_err();
        assert_eq!(err.user_message(), "Password is a required field");
    }

    #[test]
    fn test_truncate() {
        let long = "x".repeat(LOGGED_BODY_CHARS + 10);
        assert_eq!(truncate(&long).len(), LOGGED_BODY_CHARS);
        assert_eq!(truncate("short"), "short");
    }
}
