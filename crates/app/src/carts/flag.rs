//! Checkout-in-flight marker.

use std::sync::Arc;

use tracing::debug;

use crate::storage::{Storage, StorageError};

/// Storage key holding the marker.
pub const CHECKOUT_FLAG_KEY: &str = "checkout_started";

const SET: &str = "true";

/// Records that a checkout redirect was issued and the shopper has not yet reached the
/// confirmation page.
///
/// This is a weak signal only. It does not prove a purchase happened.
#[derive(Clone)]
pub struct CheckoutFlag {
    storage: Arc<dyn Storage>,
}

impl CheckoutFlag {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Mark a checkout as started.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker cannot be written.
    pub fn set(&self) -> Result<(), StorageError> {
        self.storage.set(CHECKOUT_FLAG_KEY, SET)?;

        debug!(key = CHECKOUT_FLAG_KEY, "checkout flag set");

        Ok(())
    }

    /// Whether a checkout is marked as started.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker cannot be read.
    pub fn is_set(&self) -> Result<bool, StorageError> {
        Ok(self.storage.get(CHECKOUT_FLAG_KEY)?.as_deref() == Some(SET))
    }

    /// Remove the marker.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing marker cannot be removed.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(CHECKOUT_FLAG_KEY)?;

        debug!(key = CHECKOUT_FLAG_KEY, "checkout flag cleared");

        Ok(())
    }
}

impl std::fmt::Debug for CheckoutFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutFlag")
            .field("key", &CHECKOUT_FLAG_KEY)
            .finish_non_exhaustive()
    }
}
