//! Key-value persistence for player preferences and the leaderboard.
//!
//! Each record is a JSON document stored under a string key. [`FileStore`]
//! keeps one `<key>.json` file per record in a data directory
//! (`~/.flipping-bird/` by default); [`MemoryStore`] keeps them in a map and
//! backs tests and `--ephemeral` sessions.

use crate::error::StoreError;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Durable string storage keyed by record name.
pub trait KeyValueStore {
    /// Read a record. `Ok(None)` means the record has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a record, replacing any previous contents.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a record. Deleting a missing record is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Decode a JSON record, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: Default + serde::de::DeserializeOwned,
{
    match store.get(key) {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!("Record '{}' is unreadable, using default: {}", key, e);
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!("{}", e);
            T::default()
        }
    }
}

/// Encode a value as pretty-printed JSON and store it.
pub fn save_json<T: serde::Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    data: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(data).map_err(|e| StoreError::encode(key, e))?;
    store.set(key, &json)
}

/// Get the default data directory (`~/.flipping-bird/`).
pub fn default_data_dir() -> Result<PathBuf, StoreError> {
    let home_dir = dirs::home_dir().ok_or(StoreError::NoDataDir)?;
    Ok(home_dir.join(".flipping-bird"))
}

/// File-backed store: one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::io("<data dir>", e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.record_path(key)) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.record_path(key), value).map_err(|e| StoreError::io(key, e))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.record_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }
}

/// In-memory store. Contents vanish with the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.records.remove(key);
        Ok(())
    }
}
