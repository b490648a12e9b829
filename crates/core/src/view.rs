//! Cart presentation model.
//!
//! A cart is rendered in one of two modes. [`CartMode::Editable`] exposes the
//! increment and decrement controls and a checkout action;
//! [`CartMode::ReadOnly`] shows quantities as labels and adds an order
//! summary, as on an order confirmation page. The mode only changes what is
//! offered to the user, never the underlying cart data.

use serde::Serialize;

use crate::reconcile::total_value;
use crate::types::{CartLineItem, Price, ProductId, Quantity};

/// Message shown in place of an empty cart.
pub const EMPTY_CART_MESSAGE: &str = "Cart is empty. Add more items to the cart to checkout.";

/// How a cart is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CartMode {
    /// Quantities can be changed.
    #[default]
    Editable,
    /// Quantities are displayed only.
    ReadOnly,
}

impl CartMode {
    /// Whether quantity controls are offered in this mode.
    #[must_use]
    pub const fn allows_changes(self) -> bool {
        matches!(self, Self::Editable)
    }
}

/// Absolute quantities the increment and decrement controls will request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuantityControls {
    pub increment_to: Quantity,
    pub decrement_to: Quantity,
}

impl QuantityControls {
    /// Controls for a line currently holding `current` units.
    #[must_use]
    pub const fn for_quantity(current: Quantity) -> Self {
        Self {
            increment_to: current.increment(),
            decrement_to: current.decrement(),
        }
    }
}

/// Cart item display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub quantity: Quantity,
    pub quantity_label: String,
    pub price: String,
    pub line_price: String,
    /// Present only in editable mode.
    pub controls: Option<QuantityControls>,
}

impl CartItemView {
    fn new(item: &CartLineItem, mode: CartMode) -> Self {
        let quantity_label = match mode {
            CartMode::Editable => item.qty.to_string(),
            CartMode::ReadOnly => format!("Qty:{}", item.qty),
        };

        Self {
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.qty,
            quantity_label,
            price: item.cost.display(),
            line_price: item.line_total().display(),
            controls: mode
                .allows_changes()
                .then(|| QuantityControls::for_quantity(item.qty)),
        }
    }
}

/// Order details shown next to a read-only cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    /// Number of distinct products.
    pub product_count: usize,
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

impl OrderSummary {
    /// Summarize line items. Shipping is not charged.
    #[must_use]
    pub fn from_items(items: &[CartLineItem]) -> Self {
        let subtotal = total_value(items);
        let shipping = Price::ZERO;
        Self {
            product_count: items.len(),
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub mode: CartMode,
    pub items: Vec<CartItemView>,
    pub total: Price,
    /// Present only in read-only mode.
    pub summary: Option<OrderSummary>,
}

impl CartView {
    /// Build the view for already-hydrated line items.
    #[must_use]
    pub fn build(items: &[CartLineItem], mode: CartMode) -> Self {
        Self {
            mode,
            items: items.iter().map(|item| CartItemView::new(item, mode)).collect(),
            total: total_value(items),
            summary: match mode {
                CartMode::Editable => None,
                CartMode::ReadOnly => Some(OrderSummary::from_items(items)),
            },
        }
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the checkout action should be offered.
    #[must_use]
    pub fn can_checkout(&self) -> bool {
        self.mode.allows_changes() && !self.is_empty()
    }

    /// Formatted order total (e.g., "$25.00").
    #[must_use]
    pub fn total_display(&self) -> String {
        self.total.display()
    }
}
