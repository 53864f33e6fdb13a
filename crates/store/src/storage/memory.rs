//! In-memory storage backend for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::error::StorageError;

use super::{StorageBackend, StorageKey};

/// A backend that keeps records in a map.
///
/// Supports seeding raw values (to simulate corrupted records) and failing
/// writes on demand (to exercise the persistence-failure contract).
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<StorageKey, String>>,
    fail_writes: Mutex<bool>,
}

impl MemoryStorage {
    /// An empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw value under `key`, bypassing the store's serialization.
    pub fn seed(&self, key: StorageKey, value: impl Into<String>) {
        self.lock_entries().insert(key, value.into());
    }

    /// Make every subsequent `write` fail with [`StorageError::Io`].
    pub fn set_fail_writes(&self, fail: bool) {
        *self
            .fail_writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = fail;
    }

    /// The raw value currently stored under `key`.
    #[must_use]
    pub fn raw(&self, key: StorageKey) -> Option<String> {
        self.lock_entries().get(&key).cloned()
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<StorageKey, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        Ok(self.lock_entries().get(&key).cloned())
    }

    fn write(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        if *self
            .fail_writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
        {
            return Err(StorageError::Io("simulated write failure".to_string()));
        }
        self.lock_entries().insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        self.lock_entries().remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let storage = MemoryStorage::new();
        storage.write(StorageKey::Cart, "[]").unwrap();
        assert_eq!(storage.read(StorageKey::Cart).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_fail_writes_toggle() {
        let storage = MemoryStorage::new();
        storage.set_fail_writes(true);
        assert!(storage.write(StorageKey::Cart, "[]").is_err());

        storage.set_fail_writes(false);
        assert!(storage.write(StorageKey::Cart, "[]").is_ok());
    }

    #[test]
    fn test_seed_bypasses_writes() {
        let storage = MemoryStorage::new();
        storage.set_fail_writes(true);
        storage.seed(StorageKey::Preferences, "{corrupt");
        assert_eq!(
            storage.read(StorageKey::Preferences).unwrap().as_deref(),
            Some("{corrupt")
        );
    }
}
