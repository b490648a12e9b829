//! Local cart state.
//!
//! [`CartStore`] keeps the last cart the backend confirmed together with the
//! catalog it is rendered against. Local quantities are never guessed: a
//! change is sent to the backend and the store only moves to the returned
//! cart once the call succeeds. On failure the previous cart is kept.

use std::sync::Arc;

use storefront_cart_core::{
    CartEntry, CartLineItem, CartMode, CartView, Price, Product, ProductId, Quantity, reconcile,
    total_value,
};
use tracing::{instrument, warn};

use crate::api::CartApi;
use crate::error::SyncError;
use crate::session::SessionContext;

/// A requested change to one product's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityAction {
    /// One more unit.
    Increment,
    /// One fewer unit, stopping at zero.
    Decrement,
    /// An absolute quantity; zero removes the product.
    Set(Quantity),
}

impl QuantityAction {
    /// The absolute quantity to request given the current one.
    #[must_use]
    pub const fn target(self, current: Quantity) -> Quantity {
        match self {
            Self::Increment => current.increment(),
            Self::Decrement => current.decrement(),
            Self::Set(qty) => qty,
        }
    }
}

/// The user's cart as last confirmed by the backend.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    catalog: Arc<Vec<Product>>,
    entries: Vec<CartEntry>,
}

impl CartStore {
    /// Create a store from an already loaded catalog and cart.
    #[must_use]
    pub const fn new(catalog: Arc<Vec<Product>>, entries: Vec<CartEntry>) -> Self {
        Self { catalog, entries }
    }

    /// Load the catalog and the user's cart from the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails.
    #[instrument(skip(api, session))]
    pub async fn load(api: &CartApi, session: &SessionContext) -> Result<Self, SyncError> {
        let catalog = api.fetch_catalog().await?;
        let entries = api.fetch_cart(session).await?;
        Ok(Self::new(catalog, entries))
    }

    /// Cart entries as last returned by the backend.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// The catalog line items are hydrated against.
    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// Replace the catalog, e.g. after it was refreshed.
    pub fn set_catalog(&mut self, catalog: Arc<Vec<Product>>) {
        self.catalog = catalog;
    }

    /// Replace all entries with an authoritative cart from the backend.
    ///
    /// Entries are never merged: the backend's answer wins outright.
    pub fn replace(&mut self, entries: Vec<CartEntry>) {
        self.entries = entries;
    }

    /// Current quantity of a product; zero if it is not in the cart.
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> Quantity {
        self.entries
            .iter()
            .find(|entry| &entry.product_id == product_id)
            .map_or(Quantity::ZERO, |entry| entry.qty)
    }

    /// Hydrate the cart against the catalog.
    ///
    /// Entries for products missing from the catalog are dropped and logged.
    #[must_use]
    pub fn line_items(&self) -> Vec<CartLineItem> {
        let result = reconcile(&self.entries, &self.catalog);
        for product_id in &result.unknown {
            warn!(product_id = %product_id, "Cart entry references a product missing from the catalog");
        }
        result.items
    }

    /// Total value of the cart.
    #[must_use]
    pub fn total(&self) -> Price {
        total_value(&self.line_items())
    }

    /// Presentation model for the cart in the given mode.
    #[must_use]
    pub fn view(&self, mode: CartMode) -> CartView {
        CartView::build(&self.line_items(), mode)
    }

    /// Apply a quantity change through the backend.
    ///
    /// Holding `&mut self` for the whole call means a store cannot issue a
    /// second change while one is still outstanding.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged; the stored cart is left as it was.
    #[instrument(skip(self, api, session), fields(product_id = %product_id))]
    pub async fn change_quantity(
        &mut self,
        api: &CartApi,
        session: &SessionContext,
        product_id: &ProductId,
        action: QuantityAction,
    ) -> Result<&[CartEntry], SyncError> {
        let target = action.target(self.quantity_of(product_id));
        let entries = api.set_quantity(session, product_id, target).await?;
        self.replace(entries);
        Ok(&self.entries)
    }
}
