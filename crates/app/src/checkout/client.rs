//! Storefront GraphQL client for checkout sessions.

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{info, warn};
use trgc::items::CheckoutLine;

use crate::{
    checkout::{
        CheckoutError, CheckoutSessions,
        query::{CartCreateRequest, CartCreateResponse},
    },
    identity::BuyerIdentity,
};

/// Sales channel attributed to checkouts created by this storefront.
pub const DEFAULT_CHANNEL: &str = "online_store";

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Configuration for the storefront GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Store origin, e.g. `"https://trgc.myshopify.com"`.
    pub store_url: String,

    /// Public storefront access token.
    pub access_token: String,

    /// Storefront API version, e.g. `"2024-10"`.
    pub api_version: String,

    /// Value of the `channel` query parameter added to checkout URLs.
    pub channel: String,
}

impl StorefrontConfig {
    fn endpoint(&self) -> String {
        format!(
            "{}/api/{}/graphql.json",
            self.store_url.trim_end_matches('/'),
            self.api_version
        )
    }
}

/// HTTP client creating checkout sessions through the `cartCreate` mutation.
#[derive(Debug, Clone)]
pub struct StorefrontCheckoutClient {
    config: StorefrontConfig,
    http: Client,
}

impl StorefrontCheckoutClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl CheckoutSessions for StorefrontCheckoutClient {
    async fn create_checkout(
        &self,
        lines: &[CheckoutLine],
        identity: Option<BuyerIdentity>,
    ) -> Result<String, CheckoutError> {
        let body = CartCreateRequest::new(lines, identity.as_ref());

        let response = self
            .http
            .post(self.config.endpoint())
            .header(ACCESS_TOKEN_HEADER, &self.config.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            warn!(status = status.as_u16(), "storefront gateway error");

            return Err(CheckoutError::Gateway { status });
        }

        let parsed: CartCreateResponse = response.json().await?;

        if let Some(errors) = parsed.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|error| error.message).collect();

            return Err(CheckoutError::GraphQl(messages.join(", ")));
        }

        let payload = parsed
            .data
            .and_then(|data| data.cart_create)
            .ok_or(CheckoutError::MissingCheckoutUrl)?;

        if !payload.user_errors.is_empty() {
            let pairs: Vec<String> = payload
                .user_errors
                .iter()
                .map(|error| error.describe())
                .collect();

            return Err(CheckoutError::User(pairs.join(", ")));
        }

        let checkout_url = payload
            .cart
            .and_then(|cart| cart.checkout_url)
            .and_then(|raw| with_channel(&raw, &self.config.channel))
            .ok_or(CheckoutError::MissingCheckoutUrl)?;

        info!(lines = lines.len(), "checkout session created");

        Ok(checkout_url)
    }
}

/// Set `channel=<channel>` on a checkout URL, keeping every other query parameter.
///
/// An existing `channel` pair is replaced. Blank or unparsable URLs yield `None`.
fn with_channel(raw: &str, channel: &str) -> Option<String> {
    let raw = raw.trim();

    if raw.is_empty() {
        return None;
    }

    let mut url = Url::parse(raw).ok()?;

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "channel")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair("channel", channel);

    Some(url.into())
}
