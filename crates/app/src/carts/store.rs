//! Cart Store

use std::{error::Error as _, sync::Arc};

use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use trgc::{
    cart::Cart,
    items::{NewLineItem, VariantId},
};

use crate::{
    carts::{
        errors::CartStoreError,
        flag::CheckoutFlag,
        persistence::{load_cart, save_cart},
    },
    checkout::CheckoutSessions,
    identity::{BuyerIdentityResolver, IdentityDiagnostic},
    storage::Storage,
};

/// The shopper's cart, persisted after every mutation.
///
/// Construct one per shopper context and pass it to whatever drives the UI. Mutating operations
/// take `&mut self`, so a second checkout cannot start while one is awaiting the network.
pub struct CartStore {
    cart: Cart,
    storage: Arc<dyn Storage>,
    flag: CheckoutFlag,
    checkout: Arc<dyn CheckoutSessions>,
    identity: BuyerIdentityResolver,
}

impl CartStore {
    /// Open the store, restoring whatever cart was last persisted in `storage`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be read.
    pub fn open(
        storage: Arc<dyn Storage>,
        checkout: Arc<dyn CheckoutSessions>,
        identity: BuyerIdentityResolver,
    ) -> Result<Self, CartStoreError> {
        let cart = load_cart(storage.as_ref())?;

        Ok(Self {
            cart,
            flag: CheckoutFlag::new(storage.clone()),
            storage,
            checkout,
            identity,
        })
    }

    /// Add `quantity` of a variant, merging with an existing line item for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be persisted.
    pub fn add_item(&mut self, item: NewLineItem, quantity: u32) -> Result<(), CartStoreError> {
        self.cart.add_item(item, quantity);

        self.persist()
    }

    /// Set a variant's quantity exactly. Zero or less removes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be persisted.
    pub fn update_quantity(
        &mut self,
        variant_id: &VariantId,
        quantity: i64,
    ) -> Result<(), CartStoreError> {
        self.cart.update_quantity(variant_id, quantity);

        self.persist()
    }

    /// Remove a variant's line item, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be persisted.
    pub fn remove_item(&mut self, variant_id: &VariantId) -> Result<(), CartStoreError> {
        self.cart.remove_item(variant_id);

        self.persist()
    }

    /// Empty the cart and forget the last checkout URL.
    ///
    /// The checkout flag is left alone; only the confirmation page clears it.
    ///
    /// # Errors
    ///
    /// Returns an error if the emptied cart cannot be persisted.
    pub fn clear_cart(&mut self) -> Result<(), CartStoreError> {
        self.cart.clear();

        self.persist()
    }

    /// Create an external checkout session for the cart and return its URL.
    ///
    /// Buyer identity is resolved first and is best effort. On success the URL is stored and
    /// the checkout flag is set. On failure the cart's items and URL are unchanged and the
    /// original error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::EmptyCart`] without any network call when the cart is empty,
    /// [`CartStoreError::Checkout`] when the session cannot be created, or
    /// [`CartStoreError::Persistence`] when the cart cannot be persisted.
    pub async fn create_checkout(&mut self) -> Result<String, CartStoreError> {
        if self.cart.is_empty() {
            return Err(CartStoreError::EmptyCart);
        }

        self.cart.begin_checkout();

        if let Err(error) = self.persist() {
            self.cart.finish_checkout(None);

            return Err(error);
        }

        let resolution = self.identity.resolve().await;

        if let Some(diagnostic) = &resolution.diagnostic {
            log_diagnostic(diagnostic);
        }

        let lines = self.cart.checkout_lines();

        match self.checkout.create_checkout(&lines, resolution.identity).await {
            Ok(url) => {
                self.cart.finish_checkout(Some(url.clone()));
                self.persist()?;

                if let Err(source) = self.flag.set() {
                    warn!("failed to set checkout flag: {source}");
                }

                info!(lines = lines.len(), items = self.cart.total_items(), "checkout issued");

                Ok(url)
            }
            Err(error) => {
                self.cart.finish_checkout(None);

                if let Err(source) = self.persist() {
                    warn!("failed to persist cart after checkout failure: {source}");
                }

                Err(CartStoreError::Checkout(error))
            }
        }
    }

    /// Sum of quantities across line items.
    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    /// Sum of unit price times quantity across line items, `None` when out of range.
    pub fn total_price(&self) -> Option<Decimal> {
        self.cart.total_price()
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The checkout-in-flight marker sharing this store's storage.
    pub fn checkout_flag(&self) -> &CheckoutFlag {
        &self.flag
    }

    fn persist(&self) -> Result<(), CartStoreError> {
        save_cart(self.storage.as_ref(), &self.cart)?;

        Ok(())
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("flag", &self.flag)
            .finish_non_exhaustive()
    }
}

fn log_diagnostic(diagnostic: &IdentityDiagnostic) {
    match diagnostic {
        IdentityDiagnostic::NoSession => debug!("checking out as a guest"),
        IdentityDiagnostic::NothingToSend => debug!("profile has nothing to pre-fill"),
        IdentityDiagnostic::SessionLookupFailed(_) | IdentityDiagnostic::ProfileLookupFailed(_) => {
            match diagnostic.source() {
                Some(source) => {
                    warn!("checking out without buyer identity: {diagnostic}: {source}");
                }
                None => warn!("checking out without buyer identity: {diagnostic}"),
            }
        }
    }
}
