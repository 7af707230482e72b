//! Checkout sessions
//!
//! Hands the cart's line items to the external storefront and returns the URL the shopper
//! should be sent to. No local state is touched here.

use async_trait::async_trait;
use mockall::automock;
use trgc::items::CheckoutLine;

use crate::identity::BuyerIdentity;

mod client;
mod errors;
mod query;

pub use client::{DEFAULT_CHANNEL, StorefrontCheckoutClient, StorefrontConfig};
pub use errors::CheckoutError;

#[automock]
#[async_trait]
pub trait CheckoutSessions: Send + Sync {
    /// Create a checkout session for `lines`, pre-filled with `identity` when given.
    ///
    /// Callers guarantee `lines` is non-empty.
    async fn create_checkout(
        &self,
        lines: &[CheckoutLine],
        identity: Option<BuyerIdentity>,
    ) -> Result<String, CheckoutError>;
}

/// Stand-in used when no storefront is configured. Every request fails with
/// [`CheckoutError::NotConfigured`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckoutDisabled;

#[async_trait]
impl CheckoutSessions for CheckoutDisabled {
    async fn create_checkout(
        &self,
        _lines: &[CheckoutLine],
        _identity: Option<BuyerIdentity>,
    ) -> Result<String, CheckoutError> {
        Err(CheckoutError::NotConfigured)
    }
}
