//! Return from the external checkout.
//!
//! Two pieces cooperate here. [`ReturnPathReconciler`] watches every route change and only
//! reports that the shopper came back. [`ConfirmationPage`] is the single place that clears the
//! cart and the checkout flag, so passing through an intermediate page never discards a cart.

use tracing::{debug, info};
use trgc::cart::Cart;

use crate::{
    carts::{CartStore, CartStoreError, CheckoutFlag},
    storage::StorageError,
};

/// Default confirmation route.
pub const DEFAULT_CONFIRMATION_PATH: &str = "/thank-you";

/// Default routes a shopper lands on after leaving the external checkout.
pub const DEFAULT_RETURN_PATHS: [&str; 2] = ["/thank-you", "/dashboard"];

/// What the reconciler saw on a route change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnObservation {
    /// Not a return from checkout.
    NotReturning,

    /// The shopper is back on a post-checkout route with items still in the cart.
    Returned {
        /// The normalised route.
        route: String,

        /// Items still in the cart.
        pending_items: u64,
    },
}

/// Detects that the shopper is back from the external checkout.
#[derive(Debug, Clone)]
pub struct ReturnPathReconciler {
    flag: CheckoutFlag,
    destinations: Vec<String>,
}

impl ReturnPathReconciler {
    /// Create a reconciler recognising `destinations` as post-checkout routes.
    pub fn new<I, S>(flag: CheckoutFlag, destinations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            flag,
            destinations: destinations
                .into_iter()
                .map(|route| normalise_route(route.as_ref()))
                .collect(),
        }
    }

    /// Observe a route change. Nothing is modified.
    ///
    /// # Errors
    ///
    /// Returns an error if the checkout flag cannot be read.
    pub fn on_route_change(
        &self,
        route: &str,
        cart: &Cart,
    ) -> Result<ReturnObservation, StorageError> {
        let route = normalise_route(route);

        if !self.destinations.contains(&route) {
            return Ok(ReturnObservation::NotReturning);
        }

        let pending_items = cart.total_items();

        if pending_items == 0 || !self.flag.is_set()? {
            debug!(route = %route, "post-checkout route without a pending checkout");

            return Ok(ReturnObservation::NotReturning);
        }

        info!(route = %route, pending_items, "shopper returned from checkout");

        Ok(ReturnObservation::Returned {
            route,
            pending_items,
        })
    }
}

/// The order confirmation route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPage {
    path: String,
}

impl ConfirmationPage {
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            path: normalise_route(path),
        }
    }

    /// The normalised confirmation route.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether `route` is the confirmation route.
    pub fn matches(&self, route: &str) -> bool {
        normalise_route(route) == self.path
    }

    /// Mount effect: empty the cart and delete the checkout flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart or the flag cannot be persisted.
    pub fn on_mount(&self, store: &mut CartStore) -> Result<(), CartStoreError> {
        let cleared_items = store.total_items();

        store.clear_cart()?;
        store
            .checkout_flag()
            .clear()
            .map_err(CartStoreError::Flag)?;

        info!(cleared_items, "order confirmed, cart cleared");

        Ok(())
    }
}

impl Default for ConfirmationPage {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRMATION_PATH)
    }
}

/// Normalise a route for comparison: query and fragment are dropped, as are trailing slashes.
///
/// The root route stays `/`.
pub fn normalise_route(route: &str) -> String {
    let path = route
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();

    let trimmed = path.trim_end_matches('/');

    if trimmed.is_empty() {
        return "/".to_string();
    }

    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use testresult::TestResult;
    use trgc::items::{DropId, NewLineItem, VariantId};

    use super::*;
    use crate::{
        checkout::MockCheckoutSessions,
        identity::BuyerIdentityResolver,
        storage::{MemoryStorage, Storage},
    };

    fn hoodie() -> NewLineItem {
        NewLineItem {
            drop_id: DropId::new("drop-1"),
            variant_id: VariantId::new("gid://shopify/ProductVariant/1"),
            title: "Hoodie".to_string(),
            price: Decimal::new(59_95, 2),
            image: None,
        }
    }

    fn store(storage: Arc<dyn Storage>) -> TestResult<CartStore> {
        Ok(CartStore::open(
            storage,
            Arc::new(MockCheckoutSessions::new()),
            BuyerIdentityResolver::anonymous(),
        )?)
    }

    fn reconciler(store: &CartStore) -> ReturnPathReconciler {
        ReturnPathReconciler::new(store.checkout_flag().clone(), DEFAULT_RETURN_PATHS)
    }

    #[test]
    fn normalises_routes() {
        assert_eq!(normalise_route("/thank-you"), "/thank-you");
        assert_eq!(normalise_route("/thank-you/"), "/thank-you");
        assert_eq!(normalise_route("/thank-you?order=1#top"), "/thank-you");
        assert_eq!(normalise_route("thank-you"), "/thank-you");
        assert_eq!(normalise_route(""), "/");
        assert_eq!(normalise_route("/?utm=x"), "/");
    }

    #[test]
    fn detects_return_with_flag_and_items() -> TestResult {
        let mut store = store(Arc::new(MemoryStorage::new()))?;

        store.add_item(hoodie(), 2)?;
        store.checkout_flag().set()?;

        let observation =
            reconciler(&store).on_route_change("/dashboard?from=checkout", store.cart())?;

        assert_eq!(
            observation,
            ReturnObservation::Returned {
                route: "/dashboard".to_string(),
                pending_items: 2,
            }
        );

        Ok(())
    }

    #[test]
    fn detection_does_not_clear_anything() -> TestResult {
        let mut store = store(Arc::new(MemoryStorage::new()))?;

        store.add_item(hoodie(), 1)?;
        store.checkout_flag().set()?;

        reconciler(&store).on_route_change("/dashboard", store.cart())?;

        assert_eq!(store.total_items(), 1);
        assert!(store.checkout_flag().is_set()?, "flag should survive detection");

        Ok(())
    }

    #[test]
    fn ignores_routes_without_pending_checkout() -> TestResult {
        let mut store = store(Arc::new(MemoryStorage::new()))?;
        let reconciler = reconciler(&store);

        assert_eq!(
            reconciler.on_route_change("/dashboard", store.cart())?,
            ReturnObservation::NotReturning
        );

        store.add_item(hoodie(), 1)?;

        assert_eq!(
            reconciler.on_route_change("/dashboard", store.cart())?,
            ReturnObservation::NotReturning
        );

        store.checkout_flag().set()?;

        assert_eq!(
            reconciler.on_route_change("/drops/current", store.cart())?,
            ReturnObservation::NotReturning
        );

        Ok(())
    }

    #[test]
    fn confirmation_clears_cart_and_flag() -> TestResult {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut store = store(storage.clone())?;
        let page = ConfirmationPage::default();

        store.add_item(hoodie(), 2)?;
        store.checkout_flag().set()?;

        assert!(page.matches("/thank-you/?order=42"), "confirmation route should match");

        page.on_mount(&mut store)?;

        assert_eq!(store.total_items(), 0);
        assert!(!store.checkout_flag().is_set()?, "flag should be cleared");

        let reopened = self::store(storage)?;

        assert!(reopened.cart().is_empty(), "persisted cart should be empty");

        Ok(())
    }

    #[test]
    fn custom_confirmation_path() {
        let page = ConfirmationPage::new("/order/complete/");

        assert_eq!(page.path(), "/order/complete");
        assert!(page.matches("/order/complete"), "custom path should match");
        assert!(!page.matches("/thank-you"), "default path should not match");
    }
}
