//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::{
    carts::{CartStore, CartStoreError},
    checkout::{CheckoutDisabled, CheckoutSessions, StorefrontCheckoutClient},
    config::AppConfig,
    identity::{BuyerIdentityResolver, SupabaseClient},
    returns::{ConfirmationPage, ReturnPathReconciler},
    storage::{FileStorage, MemoryStorage, Storage, StorageError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to open storage")]
    Storage(#[source] StorageError),

    #[error("failed to open cart")]
    Cart(#[source] CartStoreError),
}

/// Everything a command needs, wired from configuration.
#[derive(Debug)]
pub struct AppContext {
    pub store: CartStore,
    pub reconciler: ReturnPathReconciler,
    pub confirmation: ConfirmationPage,
    pub currency: String,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// Missing storefront settings disable checkout; missing backend settings make every
    /// checkout a guest checkout.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage directory cannot be prepared or read.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let storage: Arc<dyn Storage> = if config.storage.ephemeral {
            Arc::new(MemoryStorage::new())
        } else {
            Arc::new(
                FileStorage::open(config.storage.storage_dir.clone())
                    .map_err(AppInitError::Storage)?,
            )
        };

        let checkout: Arc<dyn CheckoutSessions> = match config.shopify.storefront() {
            Some(storefront) => Arc::new(StorefrontCheckoutClient::new(storefront)),
            None => {
                debug!("storefront not configured, checkout disabled");

                Arc::new(CheckoutDisabled)
            }
        };

        let identity = match config.backend.supabase() {
            Some(supabase) => {
                let client = Arc::new(SupabaseClient::new(supabase));

                BuyerIdentityResolver::new(client.clone(), client)
            }
            None => BuyerIdentityResolver::anonymous(),
        };

        let store = CartStore::open(storage, checkout, identity).map_err(AppInitError::Cart)?;

        Ok(Self {
            reconciler: ReturnPathReconciler::new(
                store.checkout_flag().clone(),
                &config.routes.return_paths,
            ),
            confirmation: ConfirmationPage::new(&config.routes.confirmation_path),
            currency: config.currency.clone(),
            store,
        })
    }
}
