//! In-memory Storage

use std::sync::Mutex;

use rustc_hash::FxHashMap;

use super::{Storage, StorageError};

/// Process-local storage. Nothing outlives the value.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<FxHashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let records = self.records.lock().map_err(|_poisoned| StorageError::Poisoned)?;

        Ok(records.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut records = self.records.lock().map_err(|_poisoned| StorageError::Poisoned)?;

        records.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut records = self.records.lock().map_err(|_poisoned| StorageError::Poisoned)?;

        records.remove(key);

        Ok(())
    }
}
