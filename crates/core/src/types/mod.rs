//! Core types for the storefront cart.
//!
//! This module provides type-safe wrappers for the cart domain.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod quantity;

use thiserror::Error;

pub use cart::{CartEntry, CartLineItem};
pub use id::ProductId;
pub use price::Price;
pub use product::Product;
pub use quantity::Quantity;

/// Errors raised when caller input is rejected before reaching the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The product identifier is empty.
    #[error("product id cannot be empty")]
    EmptyProductId,
    /// The product identifier exceeds the maximum length.
    #[error("product id must be at most {max} characters")]
    ProductIdTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The product identifier contains whitespace or control characters.
    #[error("product id contains invalid character {0:?}")]
    MalformedProductId(char),
    /// A quantity below zero was requested.
    #[error("quantity cannot be negative (got {0})")]
    NegativeQuantity(i64),
    /// A quantity that does not fit the cart's quantity range was requested.
    #[error("quantity {0} is too large")]
    QuantityTooLarge(i64),
    /// A price below zero was supplied.
    #[error("price cannot be negative (got {0})")]
    NegativePrice(rust_decimal::Decimal),
    /// A price above the largest accepted unit cost was supplied.
    #[error("price {0} is too large")]
    PriceTooLarge(rust_decimal::Decimal),
}
