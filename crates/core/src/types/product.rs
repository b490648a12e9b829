//! Catalog products.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product available to buy.
///
/// Products are owned by the catalog; the cart never modifies them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique ID for the product.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// The name or title of the product.
    pub name: String,
    /// The category that the product belongs to.
    pub category: String,
    /// The price to buy one unit.
    pub cost: Price,
    /// Aggregate rating out of five.
    pub rating: u8,
    /// URL of the product image.
    pub image: String,
}

impl Product {
    /// Highest rating a product can have.
    pub const MAX_RATING: u8 = 5;

    /// Rating clamped to the 0-5 range for display.
    #[must_use]
    pub fn stars(&self) -> u8 {
        self.rating.min(Self::MAX_RATING)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::ValidationError;

    #[test]
    fn test_deserialize_catalog_json() {
        let json = r#"{
            "name": "Tan Leatherette Weekender Duffle",
            "category": "Fashion",
            "cost": 150,
            "rating": 4,
            "image": "https://assets.example.com/products/weekender-duffle.png",
            "_id": "PmInA797xJhMIPti"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "PmInA797xJhMIPti");
        assert_eq!(product.cost, Price::from_units(150));
        assert_eq!(product.stars(), 4);
    }

    #[test]
    fn test_catalog_with_negative_cost_is_rejected() {
        let json = r#"[
            {"_id": "a", "name": "Duffle", "category": "Fashion", "cost": 10, "rating": 4, "image": ""},
            {"_id": "b", "name": "Lamp", "category": "Home", "cost": -5, "rating": 3, "image": ""}
        ]"#;
        let err = serde_json::from_str::<Vec<Product>>(json).unwrap_err();
        let expected = ValidationError::NegativePrice(Decimal::new(-5, 0)).to_string();
        assert!(err.to_string().contains(&expected), "{err}");
    }

    #[test]
    fn test_stars_clamped() {
        let product = Product {
            id: ProductId::new("x"),
            name: "x".to_string(),
            category: "x".to_string(),
            cost: Price::ZERO,
            rating: 9,
            image: String::new(),
        };
        assert_eq!(product.stars(), 5);
    }
}
