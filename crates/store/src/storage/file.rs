//! File-backed storage: one JSON file per key under a data directory.

use std::path::{Path, PathBuf};

use crate::error::StorageError;

use super::{StorageBackend, StorageKey};

/// Persists each record as `<data_dir>/<key>.json`.
///
/// Writes go through a temp file followed by a rename, so an interrupted
/// write never leaves a half-written record behind.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a data directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "file storage opened");
        Ok(Self { dir })
    }

    /// The directory records are stored under.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        let path = self.path(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key.as_str()));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
