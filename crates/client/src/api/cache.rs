//! Cache types for backend responses.

use std::sync::Arc;

use storefront_cart_core::Product;

/// Cache key for cached backend reads.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Catalog,
}

/// Cached catalog, shared with callers without copying.
pub type CachedCatalog = Arc<Vec<Product>>;
