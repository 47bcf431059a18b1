//! Durable key/value storage for the serialized resume.
//!
//! One key maps to one JSON document. The file-backed implementation keeps each
//! key in `<dir>/<key>.json` and replaces it atomically so a crash mid-write
//! never leaves a truncated document behind.

#[cfg(test)]
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage read failed for '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage write failed for '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize stored value: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Storage task failed: {0}")]
    Task(String),
}

#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Returns `None` when nothing has been stored under `key` yet.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Stores each key as a JSON file inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let dir = self.dir.clone();
        let target = self.path_for(key);
        let owned_key = key.to_string();
        let bytes = value.as_bytes().to_vec();

        // Temp file in the same directory so the final rename stays on one filesystem.
        tokio::task::spawn_blocking(move || -> Result<(), StorageError> {
            let write_err = |source| StorageError::Write {
                key: owned_key.clone(),
                source,
            };
            std::fs::create_dir_all(&dir).map_err(write_err)?;
            let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(write_err)?;
            tmp.write_all(&bytes).map_err(write_err)?;
            tmp.as_file().sync_all().map_err(write_err)?;
            tmp.persist(&target).map_err(|e| write_err(e.error))?;
            Ok(())
        })
        .await
        .map_err(|e| StorageError::Task(e.to_string()))?
    }
}

/// In-process storage for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut entries) = storage.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        storage
    }
}

#[cfg(test)]
#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Task(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Task(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
