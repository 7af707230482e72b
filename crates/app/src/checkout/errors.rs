//! Checkout session errors.

use reqwest::StatusCode;
use thiserror::Error;

/// Reasons a checkout session could not be created.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The storefront endpoint answered with a non-2xx status.
    #[error("storefront gateway returned {status}")]
    Gateway {
        /// HTTP status returned by the endpoint.
        status: StatusCode,
    },

    /// The response carried top-level GraphQL errors.
    #[error("storefront query failed: {0}")]
    GraphQl(String),

    /// The commerce system rejected the cart, e.g. an unavailable variant.
    #[error("cart rejected: {0}")]
    User(String),

    /// The mutation succeeded without returning a usable checkout URL.
    #[error("storefront returned no checkout url")]
    MissingCheckoutUrl,

    /// No storefront is configured, so no session can be created.
    #[error("storefront checkout is not configured")]
    NotConfigured,

    /// The request could not be sent or the response body could not be read.
    #[error("storefront request failed")]
    Http(#[from] reqwest::Error),
}
