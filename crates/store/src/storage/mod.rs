//! Key-value persistence backends.
//!
//! The store persists four independently-keyed records. Key names are part
//! of the on-disk contract and must stay stable across versions; they match
//! the keys the original browser build used in local storage.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// The four persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// The shopping cart.
    Cart,
    /// The consumption log.
    ConsumptionLog,
    /// User goals.
    Preferences,
    /// The user's flagged allergens.
    Allergens,
}

impl StorageKey {
    /// Every key, in restore order.
    pub const ALL: [Self; 4] = [
        Self::Cart,
        Self::ConsumptionLog,
        Self::Preferences,
        Self::Allergens,
    ];

    /// Stable storage-key name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cart => "cartItems",
            Self::ConsumptionLog => "calorieTracker",
            Self::Preferences => "userPreferences",
            Self::Allergens => "userAllergens",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A synchronous key-value persistence backend.
///
/// The core is single-threaded and every operation runs to completion, so a
/// backend only needs to guarantee that each individual `write` either fully
/// replaces the record or leaves the previous value intact.
pub trait StorageBackend {
    /// Read the record stored under `key`, or `None` if absent.
    fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError>;

    /// Replace the record stored under `key`.
    fn write(&self, key: StorageKey, value: &str) -> Result<(), StorageError>;

    /// Remove the record stored under `key`. Absence is not an error.
    fn remove(&self, key: StorageKey) -> Result<(), StorageError>;
}
