//! Error types for store operations and persistence.
//!
//! No error here is fatal: validation errors reject the operation before any
//! mutation, and persistence errors leave the in-memory state mutated and
//! usable for the rest of the session.

use std::collections::BTreeSet;

use greenbasket_core::{CartEntryId, MAX_QUANTITY, MIN_QUANTITY};
use thiserror::Error;

/// Failure writing to or reading from the persistence backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying medium failed (disk full, permissions, ...).
    #[error("storage I/O error: {0}")]
    Io(String),
    /// A collection could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Failure of a store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Quantity outside the accepted range. The operation was rejected and
    /// no state changed.
    #[error("invalid quantity {0}: must be between {MIN_QUANTITY} and {MAX_QUANTITY}")]
    InvalidQuantity(u32),

    /// The product's allergens intersect the user's flagged set and the
    /// caller has not acknowledged the conflict. No state changed; retry
    /// with [`AllergenAck::Proceed`](crate::store::AllergenAck::Proceed)
    /// to add anyway.
    #[error("product contains flagged allergens: {allergens:?}")]
    AllergenConflict {
        /// The intersection that triggered the conflict.
        allergens: BTreeSet<String>,
    },

    /// `update_quantity` referenced a cart entry that does not exist.
    #[error("unknown cart entry: {0}")]
    UnknownCartEntry(CartEntryId),

    /// Persisting a collection failed. The in-memory mutation already took
    /// effect; durability is not guaranteed and the caller should warn the
    /// user.
    #[error("persistence failed: {0}")]
    Persistence(#[from] StorageError),
}
