//! Shared fixtures for Greenbasket integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;
use std::path::PathBuf;

use greenbasket_core::{Nutrients, Product};
use rust_decimal::Decimal;
use tempfile::TempDir;

/// A sample product in the shape the original snack catalog used.
#[must_use]
pub fn sample_product(id: &str, name: &str, calories: u32, allergens: &[&str]) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price: Decimal::from(20),
        calories,
        nutrients: Nutrients {
            protein: Decimal::from(2),
            carbs: Decimal::from(15),
            fat: Decimal::from(10),
            fiber: Decimal::from(1),
            sugar: Decimal::ZERO,
        },
        allergens: allergens.iter().map(ToString::to_string).collect(),
        ingredients: vec!["salt".to_string()],
        image: format!("/{id}.jpg"),
    }
}

/// The user allergen set `{milk}` used across conflict scenarios.
#[must_use]
pub fn milk_allergy() -> BTreeSet<String> {
    ["milk".to_string()].into()
}

/// Write `products` as a catalog JSON file inside a fresh temp dir.
///
/// Returns the dir guard (dropping it removes the file) and the file path.
#[must_use]
pub fn write_catalog_file(products: &[Product]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, serde_json::to_string_pretty(products).unwrap()).unwrap();
    (dir, path)
}
