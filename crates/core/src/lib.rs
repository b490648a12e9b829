//! Storefront Cart Core - types and the cart reconciler.
//!
//! This crate is used by every storefront cart component:
//! - `client` - Backend client that synchronizes cart quantities
//! - `cli` - Command-line tools for inspecting and editing a cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no logging. Dropped cart entries are reported back to the caller
//! instead of being logged here.
//!
//! # Modules
//!
//! - [`types`] - Product, cart entry, line item, price and quantity types
//! - [`reconcile`] - Joins a sparse cart against the catalog and totals it
//! - [`view`] - Presentation model for editable and read-only cart views

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod reconcile;
pub mod types;
pub mod view;

pub use reconcile::{Reconciliation, hydrate, item_count, reconcile, total_value};
pub use types::*;
pub use view::{
    CartItemView, CartMode, CartView, EMPTY_CART_MESSAGE, OrderSummary, QuantityControls,
};
