//! Shopping cart line items.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::product::Product;

/// Smallest quantity accepted for a cart line.
pub const MIN_QUANTITY: u32 = 1;
/// Largest quantity accepted for a cart line.
pub const MAX_QUANTITY: u32 = 99;

/// Unique identifier for a cart entry.
///
/// The cart uses an append model: adding the same product twice creates two
/// entries, so the product id alone cannot identify a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartEntryId(Uuid);

impl CartEntryId {
    /// Generate a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for CartEntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CartEntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// One line item awaiting checkout.
///
/// Display fields (`name`, `price`, `calories`) are denormalized copies taken
/// at add time so that a cart view never needs a catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Entry identity, unique per add event.
    pub id: CartEntryId,
    /// Id of the product this line references.
    pub product_id: String,
    /// Product name at add time.
    pub name: String,
    /// Unit price at add time.
    pub price: Decimal,
    /// Calories per serving at add time.
    pub calories: u32,
    /// Serving count, within [`MIN_QUANTITY`]..=[`MAX_QUANTITY`].
    pub quantity: u32,
    /// When this line was added. Immutable thereafter.
    pub added_at: DateTime<Utc>,
}

impl CartEntry {
    /// Build a cart line for `quantity` servings of `product`.
    ///
    /// Quantity validation belongs to the store; this constructor only
    /// snapshots the product fields.
    #[must_use]
    pub fn new(product: &Product, quantity: u32, added_at: DateTime<Utc>) -> Self {
        Self {
            id: CartEntryId::generate(),
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            calories: product.calories,
            quantity,
            added_at,
        }
    }

    /// Price for the whole line (unit price times quantity).
    #[must_use]
    pub fn line_price(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: "lays-001".to_string(),
            name: "Lays".to_string(),
            price: Decimal::from(20),
            calories: 150,
            nutrients: super::super::product::Nutrients::default(),
            allergens: ["wheat".to_string(), "soy".to_string()].into(),
            ingredients: vec!["potatoes".to_string()],
            image: "/lays.jpg".to_string(),
        }
    }

    #[test]
    fn test_cart_entry_snapshots_product_fields() {
        let now = Utc::now();
        let entry = CartEntry::new(&product(), 3, now);

        assert_eq!(entry.product_id, "lays-001");
        assert_eq!(entry.name, "Lays");
        assert_eq!(entry.price, Decimal::from(20));
        assert_eq!(entry.calories, 150);
        assert_eq!(entry.quantity, 3);
        assert_eq!(entry.added_at, now);
    }

    #[test]
    fn test_line_price() {
        let entry = CartEntry::new(&product(), 3, Utc::now());
        assert_eq!(entry.line_price(), Decimal::from(60));
    }

    #[test]
    fn test_entry_ids_are_unique_per_add() {
        let now = Utc::now();
        let a = CartEntry::new(&product(), 1, now);
        let b = CartEntry::new(&product(), 1, now);
        assert_ne!(a.id, b.id);
    }
}
