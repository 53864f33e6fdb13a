//! Consumption log entries and nutrient totals.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::{Nutrients, Product};

/// An immutable historical record of nutrients logged at add-time.
///
/// Fields are denormalized snapshots, not live references: an entry survives
/// catalog changes and records the product as it was when logged. Calories
/// and nutrients are pre-multiplied by the logged quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionEntry {
    /// Product name at logging time.
    pub name: String,
    /// Total calories for the logged servings.
    pub calories: u32,
    /// Total nutrients for the logged servings.
    #[serde(default)]
    pub nutrients: Nutrients,
    /// Allergens of the logged product.
    #[serde(default)]
    pub allergens: BTreeSet<String>,
    /// When this entry was logged. Acts as the entry's identity key.
    pub logged_at: DateTime<Utc>,
}

impl ConsumptionEntry {
    /// Derive a log entry for `quantity` servings of `product`.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32, logged_at: DateTime<Utc>) -> Self {
        Self {
            name: product.name.clone(),
            calories: product.calories.saturating_mul(quantity),
            nutrients: product.nutrients.scaled(quantity),
            allergens: product.allergens.clone(),
            logged_at,
        }
    }
}

/// Summed calories and macro nutrients over a set of log entries.
///
/// Only the three goal-tracked macros are totalled; fiber and sugar stay on
/// the individual entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientTotals {
    /// Total calories.
    pub calories: u64,
    /// Total protein in grams.
    pub protein: Decimal,
    /// Total carbohydrates in grams.
    pub carbs: Decimal,
    /// Total fat in grams.
    pub fat: Decimal,
}

impl NutrientTotals {
    /// Fold one entry into the running totals.
    pub fn accumulate(&mut self, entry: &ConsumptionEntry) {
        self.calories += u64::from(entry.calories);
        self.protein += entry.nutrients.protein;
        self.carbs += entry.nutrients.carbs;
        self.fat += entry.nutrients.fat;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: "p1".to_string(),
            name: "P1".to_string(),
            price: Decimal::from(20),
            calories: 150,
            nutrients: Nutrients {
                protein: Decimal::from(2),
                carbs: Decimal::from(15),
                fat: Decimal::from(10),
                fiber: Decimal::from(1),
                sugar: Decimal::ZERO,
            },
            allergens: ["wheat".to_string()].into(),
            ingredients: Vec::new(),
            image: String::new(),
        }
    }

    #[test]
    fn test_entry_multiplies_by_quantity() {
        let entry = ConsumptionEntry::from_product(&product(), 2, Utc::now());

        assert_eq!(entry.calories, 300);
        assert_eq!(entry.nutrients.protein, Decimal::from(4));
        assert_eq!(entry.nutrients.carbs, Decimal::from(30));
        assert_eq!(entry.nutrients.fat, Decimal::from(20));
    }

    #[test]
    fn test_entry_keeps_allergen_snapshot() {
        let entry = ConsumptionEntry::from_product(&product(), 1, Utc::now());
        assert!(entry.allergens.contains("wheat"));
    }

    #[test]
    fn test_totals_accumulate() {
        let mut totals = NutrientTotals::default();
        totals.accumulate(&ConsumptionEntry::from_product(&product(), 1, Utc::now()));
        totals.accumulate(&ConsumptionEntry::from_product(&product(), 2, Utc::now()));

        assert_eq!(totals.calories, 450);
        assert_eq!(totals.protein, Decimal::from(6));
        assert_eq!(totals.carbs, Decimal::from(45));
        assert_eq!(totals.fat, Decimal::from(30));
    }

    #[test]
    fn test_default_totals_are_zero() {
        let totals = NutrientTotals::default();
        assert_eq!(totals.calories, 0);
        assert_eq!(totals.protein, Decimal::ZERO);
    }
}
