//! Greenbasket Core - Shared domain types.
//!
//! This crate provides the common types used across all Greenbasket
//! components:
//! - `store` - Cart/consumption-log state, aggregation, and persistence
//! - `cli` - Command-line consumer of the store
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage access, no clock reads outside of explicitly passed instants.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Products, cart entries, consumption entries, preferences,
//!   and period filters
//! - [`allergens`] - Allergen-conflict checking

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod allergens;
pub mod types;

pub use allergens::has_conflict;
pub use types::*;
