//! Cart entries and hydrated line items.

use serde::{Deserialize, Serialize};

use super::{Price, Product, ProductId, Quantity};

/// A sparse cart entry as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    /// Product the entry refers to.
    pub product_id: ProductId,
    /// Units of the product in the cart.
    pub qty: Quantity,
}

impl CartEntry {
    /// Create a cart entry.
    #[must_use]
    pub fn new(product_id: impl Into<ProductId>, qty: u32) -> Self {
        Self {
            product_id: product_id.into(),
            qty: Quantity::new(qty),
        }
    }
}

/// A cart entry joined with its catalog product.
///
/// Line items are derived data: they are rebuilt from the entries and the
/// catalog every time the cart is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Product the line refers to.
    pub product_id: ProductId,
    /// The name or title of the product.
    pub name: String,
    /// The category that the product belongs to.
    pub category: String,
    /// Price of one unit.
    pub cost: Price,
    /// Aggregate rating out of five.
    pub rating: u8,
    /// URL of the product image.
    pub image: String,
    /// Units of the product in the cart.
    pub qty: Quantity,
}

impl CartLineItem {
    /// Join a catalog product with a cart quantity.
    #[must_use]
    pub fn from_product(product: &Product, qty: Quantity) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            cost: product.cost,
            rating: product.rating,
            image: product.image.clone(),
            qty,
        }
    }

    /// Cost of all units on this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.cost * self.qty
    }
}
