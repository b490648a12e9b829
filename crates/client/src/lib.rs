//! Storefront Cart client.
//!
//! Talks to the cart backend on behalf of the storefront: loads the catalog
//! and the user's cart, and keeps cart quantities in sync through the
//! backend's single absolute-set mutation.
//!
//! # Architecture
//!
//! - [`CartApi`] wraps the backend's HTTP endpoints (`reqwest`)
//! - [`SessionContext`] carries the bearer token; it is passed explicitly to
//!   every authenticated call rather than read from ambient storage
//! - [`CartStore`] holds the last known-good cart and re-hydrates it through
//!   the core reconciler after every successful mutation
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_cart_client::{CartApi, CartStore, ClientConfig, QuantityAction, SessionContext};
//! use storefront_cart_core::{CartMode, ProductId};
//!
//! let api = CartApi::new(&ClientConfig::from_env()?)?;
//! let session = api.login("shopper", "correct-horse-battery").await?;
//!
//! let mut store = CartStore::load(&api, &session).await?;
//! store
//!     .change_quantity(&api, &session, &ProductId::parse("BW0jAAeDJmlZCF8i")?, QuantityAction::Increment)
//!     .await?;
//!
//! let view = store.view(CartMode::Editable);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod session;
pub mod store;

pub use api::CartApi;
pub use config::{ClientConfig, ConfigError};
pub use error::{Result, SyncError};
pub use session::SessionContext;
pub use store::{CartStore, QuantityAction};
