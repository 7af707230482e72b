//! Identity errors and diagnostics.

use thiserror::Error;

/// Failure talking to the session or profile backend.
#[derive(Debug, Error)]
pub enum LookupError {
    /// An HTTP transport or serialization error occurred.
    #[error("identity backend request failed")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-2xx response.
    #[error("unexpected response from identity backend: {0}")]
    UnexpectedResponse(String),
}

/// Why a checkout went ahead without buyer identity. Never fatal.
#[derive(Debug, Error)]
pub enum IdentityDiagnostic {
    /// Nobody is signed in.
    #[error("no authenticated session")]
    NoSession,

    /// The session could not be looked up.
    #[error("session lookup failed")]
    SessionLookupFailed(#[source] LookupError),

    /// The profile could not be looked up.
    #[error("profile lookup failed")]
    ProfileLookupFailed(#[source] LookupError),

    /// The member has no contact or address data worth sending.
    #[error("profile has no contact or address data")]
    NothingToSend,
}
