//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Where the cart and checkout marker live.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding persisted records
    #[arg(long, env = "TRGC_STORAGE_DIR", default_value = ".trgc")]
    pub storage_dir: PathBuf,

    /// Keep everything in memory for this invocation only
    #[arg(long, default_value_t = false)]
    pub ephemeral: bool,
}
