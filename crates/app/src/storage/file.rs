//! File Storage

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{Storage, StorageError};

/// Stores each record as `<key>.json` inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open a storage directory, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();

        fs::create_dir_all(&dir).map_err(StorageError::Prepare)?;

        Ok(Self { dir })
    }

    /// The directory records are stored in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path(key)?;

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;
        let staging = path.with_extension("json.tmp");

        // Write then rename so readers only ever see a complete record.
        fs::write(&staging, value)
            .and_then(|()| fs::rename(&staging, &path))
            .map_err(|source| StorageError::Write {
                key: key.to_string(),
                source,
            })?;

        debug!(key, bytes = value.len(), "storage.write");

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key, "storage.remove");

                Ok(())
            }
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Remove {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_record_reads_as_none() -> TestResult {
        let dir = TempDir::new()?;
        let storage = FileStorage::open(dir.path())?;

        assert_eq!(storage.get("trgc-cart")?, None);

        Ok(())
    }

    #[test]
    fn records_survive_reopening() -> TestResult {
        let dir = TempDir::new()?;

        FileStorage::open(dir.path())?.set("trgc-cart", "{\"a\":1}")?;

        let reopened = FileStorage::open(dir.path())?;

        assert_eq!(reopened.get("trgc-cart")?.as_deref(), Some("{\"a\":1}"));
        assert!(!dir.path().join("trgc-cart.json.tmp").exists());

        Ok(())
    }

    #[test]
    fn last_write_wins() -> TestResult {
        let dir = TempDir::new()?;
        let first = FileStorage::open(dir.path())?;
        let second = FileStorage::open(dir.path())?;

        first.set("trgc-cart", "first")?;
        second.set("trgc-cart", "second")?;

        assert_eq!(first.get("trgc-cart")?.as_deref(), Some("second"));

        Ok(())
    }

    #[test]
    fn remove_is_idempotent() -> TestResult {
        let dir = TempDir::new()?;
        let storage = FileStorage::open(dir.path())?;

        storage.set("checkout_started", "true")?;
        storage.remove("checkout_started")?;
        storage.remove("checkout_started")?;

        assert_eq!(storage.get("checkout_started")?, None);

        Ok(())
    }

    #[test]
    fn path_like_keys_are_rejected() -> TestResult {
        let dir = TempDir::new()?;
        let storage = FileStorage::open(dir.path())?;

        let result = storage.set("../escape", "x");

        assert!(
            matches!(result, Err(StorageError::InvalidKey(ref key)) if key == "../escape"),
            "expected InvalidKey, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn open_creates_nested_directories() -> TestResult {
        let dir = TempDir::new()?;
        let nested = dir.path().join("a").join("b");

        let storage = FileStorage::open(&nested)?;

        assert!(storage.dir().is_dir());

        Ok(())
    }
}
