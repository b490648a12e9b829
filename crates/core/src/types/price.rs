//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog costs arrive as JSON numbers. They are held as [`Decimal`] so that
//! cart totals are exact instead of accumulating floating-point error.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Quantity, ValidationError};

/// A non-negative money amount in the store's currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest unit cost accepted from the catalog.
    pub const MAX_UNIT_COST: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0); // 1_000_000_000_000

    /// Create a price.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NegativePrice`] for amounts below zero and
    /// [`ValidationError::PriceTooLarge`] for amounts above
    /// [`Price::MAX_UNIT_COST`].
    pub fn new(amount: Decimal) -> Result<Self, ValidationError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ValidationError::NegativePrice(amount));
        }
        if amount > Self::MAX_UNIT_COST {
            return Err(ValidationError::PriceTooLarge(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Get the underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

// Totals saturate at `Decimal::MAX` instead of panicking on overflow.
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Mul<Quantity> for Price {
    type Output = Self;

    fn mul(self, rhs: Quantity) -> Self {
        Self(
            self.0
                .checked_mul(Decimal::from(rhs.get()))
                .unwrap_or(Decimal::MAX),
        )
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_rejected() {
        assert!(Price::new(Decimal::new(-1, 0)).is_err());
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_units(25).display(), "$25.00");
        assert_eq!(Price::new(Decimal::new(1999, 2)).unwrap().display(), "$19.99");
        assert_eq!(Price::new(Decimal::new(1050, 2)).unwrap().to_string(), "10.5");
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let from_int: Price = serde_json::from_str("100").unwrap();
        assert_eq!(from_int, Price::from_units(100));

        let from_float: Price = serde_json::from_str("0.1").unwrap();
        assert_eq!(from_float.amount(), Decimal::new(1, 1));

        let from_str: Price = serde_json::from_str("\"12.50\"").unwrap();
        assert_eq!(from_str.amount(), Decimal::new(1250, 2));

        assert!(serde_json::from_str::<Price>("-3").is_err());
    }

    #[test]
    fn test_oversized_cost_rejected() {
        let err = serde_json::from_str::<Price>("\"79228162514264337593543950335\"").unwrap_err();
        assert!(err.to_string().contains("too large"));

        assert!(Price::new(Price::MAX_UNIT_COST).is_ok());
        assert_eq!(
            Price::new(Price::MAX_UNIT_COST + Decimal::ONE),
            Err(ValidationError::PriceTooLarge(Price::MAX_UNIT_COST + Decimal::ONE))
        );
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_panicking() {
        let huge = Price(Decimal::MAX);
        assert_eq!(huge * Quantity::new(2), Price(Decimal::MAX));
        assert_eq!(huge + Price::from_units(1), Price(Decimal::MAX));

        let max_line = Price::new(Price::MAX_UNIT_COST).unwrap() * Quantity::new(u32::MAX);
        assert_eq!(
            max_line.amount(),
            Price::MAX_UNIT_COST * Decimal::from(u32::MAX)
        );
    }

    #[test]
    fn test_sum_is_exact() {
        let dime = Price::new(Decimal::new(1, 1)).unwrap();
        let total: Price = std::iter::repeat_n(dime, 3).sum();
        assert_eq!(total.amount(), Decimal::new(3, 1));
    }

    #[test]
    fn test_mul_quantity() {
        assert_eq!(Price::from_units(10) * Quantity::new(2), Price::from_units(20));
        assert_eq!(Price::from_units(10) * Quantity::ZERO, Price::ZERO);
    }
}
