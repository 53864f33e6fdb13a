//! Core types for Greenbasket.
//!
//! Shapes here are the canonical ones: there is exactly one definition of a
//! cart entry and one of a consumption entry, shared by every consumer.

pub mod cart;
pub mod consumption;
pub mod period;
pub mod preferences;
pub mod product;

pub use cart::{CartEntry, CartEntryId, MAX_QUANTITY, MIN_QUANTITY};
pub use consumption::{ConsumptionEntry, NutrientTotals};
pub use period::PeriodFilter;
pub use preferences::{GoalProgress, NutrientGoals, Preferences};
pub use product::{Nutrients, Product};
