//! Greenbasket Store - state-and-aggregation core.
//!
//! Owns the four mutable collections (cart, consumption log, preferences,
//! user allergens), persists each under its own storage key, and exposes the
//! query/aggregation operations consumed by presentation layers.
//!
//! # Layering
//!
//! - [`catalog`] - immutable product list, loaded once at startup
//! - [`storage`] - key-value persistence backends (file-backed, in-memory)
//! - [`store`] - the mutable state owner and its operations
//! - [`aggregate`] - windowed totals and goal progress
//! - [`config`] - environment-based configuration
//!
//! The store never renders anything: no currency symbols, no locale dates.
//! Consumers receive structured values and format them as they see fit.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod error;
pub mod storage;
pub mod store;

pub use aggregate::TrackerProgress;
pub use catalog::{Catalog, CatalogError};
pub use config::{Config, ConfigError};
pub use error::{StorageError, StoreError};
pub use storage::{FileStorage, MemoryStorage, StorageBackend, StorageKey};
pub use store::{AllergenAck, CartSummary, RestoreReport, Store};
