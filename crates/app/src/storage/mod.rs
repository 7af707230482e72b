//! Durable key/value storage
//!
//! Records are whole strings stored under a key. Writers replace the full record, so when two
//! processes share a storage directory the last write wins; nothing is merged.

use std::io;

use mockall::automock;
use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key contains characters the backend cannot store.
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    /// The storage location could not be prepared.
    #[error("failed to prepare storage directory")]
    Prepare(#[source] io::Error),

    /// Reading a record failed.
    #[error("failed to read {key}")]
    Read {
        /// Record key.
        key: String,

        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Writing a record failed.
    #[error("failed to write {key}")]
    Write {
        /// Record key.
        key: String,

        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Removing a record failed.
    #[error("failed to remove {key}")]
    Remove {
        /// Record key.
        key: String,

        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A previous writer panicked while holding the store.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A synchronous string key/value store.
#[automock]
pub trait Storage: Send + Sync {
    /// Read the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the record stored under `key`. Missing records are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing record cannot be removed.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
