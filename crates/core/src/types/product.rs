//! Catalog product types.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-serving nutrient amounts in grams.
///
/// Every field defaults to zero so that catalog or log records written by
/// older versions (which may omit fields) still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrients {
    /// Protein in grams.
    #[serde(default)]
    pub protein: Decimal,
    /// Carbohydrates in grams.
    #[serde(default)]
    pub carbs: Decimal,
    /// Fat in grams.
    #[serde(default)]
    pub fat: Decimal,
    /// Fiber in grams.
    #[serde(default)]
    pub fiber: Decimal,
    /// Sugar in grams.
    #[serde(default)]
    pub sugar: Decimal,
}

impl Nutrients {
    /// Scale every nutrient by a serving count.
    #[must_use]
    pub fn scaled(&self, quantity: u32) -> Self {
        let factor = Decimal::from(quantity);
        Self {
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
            fiber: self.fiber * factor,
            sugar: self.sugar * factor,
        }
    }
}

/// A purchasable product from the catalog.
///
/// Products are immutable at runtime: the catalog is loaded once at startup
/// and shared by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier (e.g., `lays-001`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Unit price in the store currency's standard unit.
    pub price: Decimal,
    /// Calories per serving.
    pub calories: u32,
    /// Nutrients per serving.
    #[serde(default)]
    pub nutrients: Nutrients,
    /// Allergens this product contains.
    #[serde(default)]
    pub allergens: BTreeSet<String>,
    /// Ingredients, in label order.
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Image reference (path or URL), for presentation layers.
    #[serde(default)]
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nutrients_scaled() {
        let nutrients = Nutrients {
            protein: Decimal::from(2),
            carbs: Decimal::from(15),
            fat: Decimal::from(10),
            fiber: Decimal::from(1),
            sugar: Decimal::ZERO,
        };

        let doubled = nutrients.scaled(2);
        assert_eq!(doubled.protein, Decimal::from(4));
        assert_eq!(doubled.carbs, Decimal::from(30));
        assert_eq!(doubled.fat, Decimal::from(20));
        assert_eq!(doubled.fiber, Decimal::from(2));
        assert_eq!(doubled.sugar, Decimal::ZERO);
    }

    #[test]
    fn test_nutrients_missing_fields_default_to_zero() {
        let nutrients: Nutrients = serde_json::from_str(r#"{"protein": "5"}"#).unwrap();
        assert_eq!(nutrients.protein, Decimal::from(5));
        assert_eq!(nutrients.carbs, Decimal::ZERO);
        assert_eq!(nutrients.fiber, Decimal::ZERO);
    }
}
