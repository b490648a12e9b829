//! Request bodies sent to the cart backend.

use serde::Serialize;
use storefront_cart_core::{ProductId, Quantity};

/// Body of `POST /cart`: the desired absolute quantity of one product.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantityRequest<'a> {
    pub product_id: &'a ProductId,
    pub qty: Quantity,
}

/// Body of `POST /auth/login`.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}
