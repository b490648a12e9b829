//! Cart quantities.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Number of units of a product in the cart.
///
/// A quantity of zero means "remove"; the backend never returns zero-quantity
/// entries in the authoritative cart.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// The removal quantity.
    pub const ZERO: Self = Self(0);

    /// Create a quantity.
    #[must_use]
    pub const fn new(qty: u32) -> Self {
        Self(qty)
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether this quantity removes the product from the cart.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// The quantity one unit higher, saturating at the maximum.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The quantity one unit lower, never below zero.
    #[must_use]
    pub const fn decrement(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Quantity {
    fn from(qty: u32) -> Self {
        Self(qty)
    }
}

impl From<Quantity> for u32 {
    fn from(qty: Quantity) -> Self {
        qty.0
    }
}

impl TryFrom<i64> for Quantity {
    type Error = ValidationError;

    fn try_from(qty: i64) -> Result<Self, Self::Error> {
        if qty < 0 {
            return Err(ValidationError::NegativeQuantity(qty));
        }
        u32::try_from(qty)
            .map(Self)
            .map_err(|_| ValidationError::QuantityTooLarge(qty))
    }
}
