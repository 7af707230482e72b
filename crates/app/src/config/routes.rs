//! Routes Config

use clap::Args;

use crate::returns::DEFAULT_CONFIRMATION_PATH;

/// Local routes involved in returning from checkout.
#[derive(Debug, Args)]
pub struct RoutesConfig {
    /// Order confirmation route
    #[arg(long, env = "TRGC_CONFIRMATION_PATH", default_value = DEFAULT_CONFIRMATION_PATH)]
    pub confirmation_path: String,

    /// Routes treated as post-checkout destinations (comma separated)
    #[arg(
        long,
        env = "TRGC_RETURN_PATHS",
        value_delimiter = ',',
        default_values = ["/thank-you", "/dashboard"]
    )]
    pub return_paths: Vec<String>,
}
