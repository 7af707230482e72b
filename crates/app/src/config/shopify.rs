//! Shopify Config

use clap::Args;

use crate::checkout::{DEFAULT_CHANNEL, StorefrontConfig};

/// Storefront API settings. Checkout is unavailable until domain and token are both set.
#[derive(Debug, Args)]
pub struct ShopifyConfig {
    /// Store domain, e.g. `trgc.myshopify.com`
    #[arg(long, env = "SHOPIFY_STORE_DOMAIN")]
    pub store_domain: Option<String>,

    /// Storefront API access token
    #[arg(long, env = "SHOPIFY_STOREFRONT_TOKEN", hide_env_values = true)]
    pub storefront_token: Option<String>,

    /// Storefront API version
    #[arg(long, env = "SHOPIFY_API_VERSION", default_value = "2024-10")]
    pub api_version: String,

    /// Sales channel attributed to checkout URLs
    #[arg(long, env = "SHOPIFY_CHANNEL", default_value = DEFAULT_CHANNEL)]
    pub channel: String,
}

impl ShopifyConfig {
    /// Client settings, or `None` when the storefront is not configured.
    #[must_use]
    pub fn storefront(&self) -> Option<StorefrontConfig> {
        let domain = self.store_domain.as_deref().map(str::trim).filter(|d| !d.is_empty())?;
        let token = self.storefront_token.as_deref().filter(|t| !t.trim().is_empty())?;

        Some(StorefrontConfig {
            store_url: store_url(domain),
            access_token: token.to_string(),
            api_version: self.api_version.clone(),
            channel: self.channel.clone(),
        })
    }
}

fn store_url(domain: &str) -> String {
    if domain.starts_with("http://") || domain.starts_with("https://") {
        domain.to_string()
    } else {
        format!("https://{domain}")
    }
}
