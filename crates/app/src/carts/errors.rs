//! Cart Errors

use thiserror::Error;

use crate::{checkout::CheckoutError, storage::StorageError};

/// Errors reading or writing the persisted cart record.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The cart could not be encoded.
    #[error("failed to encode cart record")]
    Encode(#[from] serde_json::Error),
}

/// Errors returned by [`CartStore`](crate::carts::CartStore) operations.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// Checkout was requested with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The checkout session could not be created. The cart is unchanged.
    #[error("checkout failed")]
    Checkout(#[from] CheckoutError),

    /// The cart could not be persisted.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The checkout marker could not be updated.
    #[error("failed to update checkout flag")]
    Flag(#[source] StorageError),
}
