//! Cart reconciliation.
//!
//! Joins the backend's sparse cart against the product catalog to produce the
//! line items a cart view renders, and totals them.
//!
//! Output is in catalog order: a product listed earlier in the catalog is
//! emitted earlier, no matter when it was added to the cart. Entries whose
//! product is missing from the catalog are dropped, since the catalog may have
//! changed after the entry was stored.

use std::collections::HashMap;

use crate::types::{CartEntry, CartLineItem, Price, Product, ProductId};

/// Result of joining a cart against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Hydrated line items in catalog order.
    pub items: Vec<CartLineItem>,
    /// Cart entries whose product is not in the catalog, in cart order.
    pub unknown: Vec<ProductId>,
}

impl Reconciliation {
    /// Whether every cart entry matched a catalog product.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unknown.is_empty()
    }
}

/// Join `entries` against `catalog`, reporting entries that did not match.
///
/// The catalog is indexed once, so cost is linear in the sizes of both inputs
/// plus a sort of the matched items. When an identifier appears more than once
/// in the catalog the first occurrence is used.
#[must_use]
pub fn reconcile(entries: &[CartEntry], catalog: &[Product]) -> Reconciliation {
    let mut index: HashMap<&ProductId, (usize, &Product)> = HashMap::with_capacity(catalog.len());
    for (position, product) in catalog.iter().enumerate() {
        index.entry(&product.id).or_insert((position, product));
    }

    let mut matched = Vec::with_capacity(entries.len());
    let mut unknown = Vec::new();

    for entry in entries {
        match index.get(&entry.product_id) {
            Some(&(position, product)) => {
                matched.push((position, CartLineItem::from_product(product, entry.qty)));
            }
            None => unknown.push(entry.product_id.clone()),
        }
    }

    // Stable: entries for the same product keep their cart order.
    matched.sort_by_key(|(position, _)| *position);

    Reconciliation {
        items: matched.into_iter().map(|(_, item)| item).collect(),
        unknown,
    }
}

/// Join `entries` against `catalog`, silently dropping unknown products.
#[must_use]
pub fn hydrate(entries: &[CartEntry], catalog: &[Product]) -> Vec<CartLineItem> {
    reconcile(entries, catalog).items
}

/// Total value of the cart: the sum of `cost * qty` over all line items.
///
/// Returns zero for an empty cart.
#[must_use]
pub fn total_value(items: &[CartLineItem]) -> Price {
    items.iter().map(CartLineItem::line_total).sum()
}

/// Total number of units across all line items.
#[must_use]
pub fn item_count(items: &[CartLineItem]) -> u64 {
    items.iter().map(|item| u64::from(item.qty.get())).sum()
}
