//! Hosted backend (Supabase) client for sessions and profiles.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::debug;
use uuid::Uuid;

use crate::identity::{
    AuthenticatedUser, LookupError, Profile,
    resolver::{ProfileLookup, SessionProvider},
};

const PROFILE_COLUMNS: &str =
    "first_name,last_name,phone,street,house_number,city,postal_code,country_code";

/// Configuration for connecting to the hosted backend.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `"https://xyz.supabase.co"`.
    pub url: String,

    /// Public anon key, sent as `apikey` on every request.
    pub anon_key: String,

    /// The member's session access token. No token means nobody is signed in.
    pub access_token: Option<String>,
}

/// REST client for the auth and profile endpoints.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    config: SupabaseConfig,
    http: Client,
}

impl SupabaseClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.url.trim_end_matches('/'))
    }

    fn authorised(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self
            .config
            .access_token
            .as_deref()
            .unwrap_or(&self.config.anon_key);

        request
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
    }
}

#[async_trait]
impl SessionProvider for SupabaseClient {
    async fn current_user(&self) -> Result<Option<AuthenticatedUser>, LookupError> {
        if self.config.access_token.is_none() {
            return Ok(None);
        }

        let response = self
            .authorised(self.http.get(self.url("/auth/v1/user")))
            .send()
            .await?;

        // An expired or revoked token is the same as being signed out.
        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            debug!(status = response.status().as_u16(), "session rejected");

            return Ok(None);
        }

        let user: AuthenticatedUser = ensure_success(response, "user").await?.json().await?;

        Ok(Some(user))
    }
}

#[async_trait]
impl ProfileLookup for SupabaseClient {
    async fn profile(&self, user_id: Uuid) -> Result<Option<Profile>, LookupError> {
        let response = self
            .authorised(self.http.get(self.url("/rest/v1/profiles")))
            .query(&[
                ("id", format!("eq.{user_id}")),
                ("select", PROFILE_COLUMNS.to_string()),
            ])
            .send()
            .await?;

        let rows: Vec<Profile> = ensure_success(response, "profile").await?.json().await?;

        Ok(rows.into_iter().next())
    }
}

async fn ensure_success(response: Response, lookup: &str) -> Result<Response, LookupError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    Err(LookupError::UnexpectedResponse(format!(
        "{lookup} lookup failed with status {status}: {text}"
    )))
}
