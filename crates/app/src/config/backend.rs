//! Hosted Backend Config

use clap::Args;

use crate::identity::SupabaseConfig;

/// Supabase settings. Without a URL and anon key every checkout is a guest checkout.
#[derive(Debug, Args)]
pub struct BackendConfig {
    /// Supabase project URL
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: Option<String>,

    /// Supabase anon key
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub supabase_anon_key: Option<String>,

    /// Access token of the signed-in member
    #[arg(long, env = "SUPABASE_ACCESS_TOKEN", hide_env_values = true)]
    pub supabase_access_token: Option<String>,
}

impl BackendConfig {
    /// Client settings, or `None` when the backend is not configured.
    #[must_use]
    pub fn supabase(&self) -> Option<SupabaseConfig> {
        let url = self.supabase_url.as_deref().filter(|url| !url.trim().is_empty())?;
        let anon_key = self.supabase_anon_key.as_deref().filter(|key| !key.trim().is_empty())?;

        Some(SupabaseConfig {
            url: url.trim().to_string(),
            anon_key: anon_key.to_string(),
            access_token: self
                .supabase_access_token
                .clone()
                .filter(|token| !token.trim().is_empty()),
        })
    }
}
