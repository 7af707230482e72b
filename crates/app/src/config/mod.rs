//! Application configuration

use clap::Args;

use crate::config::{
    backend::BackendConfig, logging::LoggingConfig, routes::RoutesConfig, shopify::ShopifyConfig,
    storage::StorageConfig,
};

pub mod backend;
pub mod logging;
pub mod routes;
pub mod shopify;
pub mod storage;

/// Settings shared by every command, read from flags or the environment.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Cart storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Storefront checkout settings.
    #[command(flatten)]
    pub shopify: ShopifyConfig,

    /// Hosted backend settings used for buyer identity.
    #[command(flatten)]
    pub backend: BackendConfig,

    /// Local route settings.
    #[command(flatten)]
    pub routes: RoutesConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// ISO 4217 currency used to display prices
    #[arg(long, env = "TRGC_CURRENCY", default_value = "EUR")]
    pub currency: String,
}
