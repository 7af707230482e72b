//! Persisted cart record.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use trgc::cart::Cart;

use crate::{carts::errors::PersistenceError, storage::Storage};

/// Storage key holding the persisted cart.
pub const CART_STORAGE_KEY: &str = "trgc-cart";

/// Envelope version written by this build.
pub const CART_RECORD_VERSION: u32 = 0;

#[derive(Debug, Serialize)]
struct EnvelopeRef<'a> {
    state: &'a Cart,
    version: u32,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    state: Cart,
    version: u32,
}

/// Load the persisted cart, or an empty one when nothing usable is stored.
///
/// Records that cannot be decoded, or that carry an unknown version, are discarded with a
/// warning. The returned cart has already been rehydrated.
///
/// # Errors
///
/// Returns an error only when the storage backend itself fails.
pub fn load_cart(storage: &dyn Storage) -> Result<Cart, PersistenceError> {
    let Some(raw) = storage.get(CART_STORAGE_KEY)? else {
        debug!(key = CART_STORAGE_KEY, "no persisted cart");

        return Ok(Cart::new());
    };

    let envelope = match serde_json::from_str::<Envelope>(&raw) {
        Ok(envelope) => envelope,
        Err(error) => {
            warn!(key = CART_STORAGE_KEY, %error, "discarding unreadable cart record");

            return Ok(Cart::new());
        }
    };

    if envelope.version != CART_RECORD_VERSION {
        warn!(
            key = CART_STORAGE_KEY,
            version = envelope.version,
            "discarding cart record with unknown version"
        );

        return Ok(Cart::new());
    }

    let cart = envelope.state.rehydrate();

    debug!(key = CART_STORAGE_KEY, items = cart.len(), "cart rehydrated");

    Ok(cart)
}

/// Replace the persisted cart with `cart`.
///
/// # Errors
///
/// Returns an error if the cart cannot be encoded or written.
pub fn save_cart(storage: &dyn Storage, cart: &Cart) -> Result<(), PersistenceError> {
    let raw = serde_json::to_string(&EnvelopeRef {
        state: cart,
        version: CART_RECORD_VERSION,
    })?;

    storage.set(CART_STORAGE_KEY, &raw)?;

    debug!(key = CART_STORAGE_KEY, items = cart.len(), "cart persisted");

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::{Value, json};
    use testresult::TestResult;
    use trgc::items::{DropId, NewLineItem, VariantId};

    use super::*;
    use crate::storage::{MemoryStorage, MockStorage, StorageError};

    fn hoodie() -> NewLineItem {
        NewLineItem {
            drop_id: DropId::new("drop-1"),
            variant_id: VariantId::new("gid://shopify/ProductVariant/1"),
            title: "Hoodie".to_string(),
            price: Decimal::new(59_95, 2),
            image: None,
        }
    }

    #[test]
    fn missing_record_loads_empty_cart() -> TestResult {
        let storage = MemoryStorage::new();

        assert_eq!(load_cart(&storage)?, Cart::new());

        Ok(())
    }

    #[test]
    fn save_writes_versioned_envelope() -> TestResult {
        let storage = MemoryStorage::new();
        let mut cart = Cart::new();

        cart.add_item(hoodie(), 2);

        save_cart(&storage, &cart)?;

        let raw = storage.get(CART_STORAGE_KEY)?.ok_or("cart not written")?;
        let value: Value = serde_json::from_str(&raw)?;

        assert_eq!(
            value,
            json!({
                "state": {
                    "items": [{
                        "dropId": "drop-1",
                        "variantId": "gid://shopify/ProductVariant/1",
                        "title": "Hoodie",
                        "price": 59.95,
                        "quantity": 2
                    }],
                    "isLoading": false,
                    "checkoutUrl": null
                },
                "version": 0
            })
        );

        Ok(())
    }

    #[test]
    fn saved_cart_loads_back() -> TestResult {
        let storage = MemoryStorage::new();
        let mut cart = Cart::new();

        cart.add_item(hoodie(), 3);

        save_cart(&storage, &cart)?;

        assert_eq!(load_cart(&storage)?, cart);

        Ok(())
    }

    #[test]
    fn load_resets_in_flight_checkout() -> TestResult {
        let storage = MemoryStorage::new();
        let mut cart = Cart::new();

        cart.add_item(hoodie(), 1);
        cart.begin_checkout();

        save_cart(&storage, &cart)?;

        assert!(!load_cart(&storage)?.is_loading(), "loading flag should reset");

        Ok(())
    }

    #[test]
    fn unreadable_record_is_discarded() -> TestResult {
        let storage = MemoryStorage::new();

        storage.set(CART_STORAGE_KEY, "{not json")?;

        assert_eq!(load_cart(&storage)?, Cart::new());

        Ok(())
    }

    #[test]
    fn unknown_version_is_discarded() -> TestResult {
        let storage = MemoryStorage::new();

        storage.set(
            CART_STORAGE_KEY,
            r#"{"state":{"items":[],"isLoading":false,"checkoutUrl":null},"version":7}"#,
        )?;

        assert_eq!(load_cart(&storage)?, Cart::new());

        Ok(())
    }

    #[test]
    fn storage_failure_is_reported() {
        let mut storage = MockStorage::new();

        storage
            .expect_get()
            .returning(|_| Err(StorageError::Poisoned));

        let result = load_cart(&storage);

        assert!(
            matches!(result, Err(PersistenceError::Storage(StorageError::Poisoned))),
            "expected storage error, got {result:?}"
        );
    }
}
