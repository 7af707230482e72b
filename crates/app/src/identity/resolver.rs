//! Buyer identity resolution.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::identity::{
    AuthenticatedUser, BuyerIdentity, DeliveryAddress, DeliveryAddressPreference,
    IdentityDiagnostic, LookupError, Profile,
};

#[automock]
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The signed-in member, or `None` when nobody is signed in.
    async fn current_user(&self) -> Result<Option<AuthenticatedUser>, LookupError>;
}

#[automock]
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    /// Profile fields for a member, or `None` when no profile row exists.
    async fn profile(&self, user_id: Uuid) -> Result<Option<Profile>, LookupError>;
}

/// Backend used when no identity provider is configured: nobody is ever signed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

#[async_trait]
impl SessionProvider for Anonymous {
    async fn current_user(&self) -> Result<Option<AuthenticatedUser>, LookupError> {
        Ok(None)
    }
}

#[async_trait]
impl ProfileLookup for Anonymous {
    async fn profile(&self, _user_id: Uuid) -> Result<Option<Profile>, LookupError> {
        Ok(None)
    }
}

/// Outcome of a resolution attempt. Exactly one field is set.
#[derive(Debug)]
pub struct Resolution {
    /// Identity to pre-fill, if one could be built.
    pub identity: Option<BuyerIdentity>,

    /// Why no identity was built.
    pub diagnostic: Option<IdentityDiagnostic>,
}

impl Resolution {
    fn resolved(identity: BuyerIdentity) -> Self {
        Self {
            identity: Some(identity),
            diagnostic: None,
        }
    }

    fn degraded(diagnostic: IdentityDiagnostic) -> Self {
        Self {
            identity: None,
            diagnostic: Some(diagnostic),
        }
    }
}

/// Builds buyer identity from the signed-in member's session and profile.
#[derive(Clone)]
pub struct BuyerIdentityResolver {
    sessions: Arc<dyn SessionProvider>,
    profiles: Arc<dyn ProfileLookup>,
}

impl BuyerIdentityResolver {
    #[must_use]
    pub fn new(sessions: Arc<dyn SessionProvider>, profiles: Arc<dyn ProfileLookup>) -> Self {
        Self { sessions, profiles }
    }

    /// A resolver that never finds a session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::new(Arc::new(Anonymous), Arc::new(Anonymous))
    }

    /// Resolve the current member's buyer identity.
    ///
    /// Never fails: every failure path degrades to no identity plus a diagnostic.
    pub async fn resolve(&self) -> Resolution {
        let user = match self.sessions.current_user().await {
            Ok(Some(user)) => user,
            Ok(None) => return Resolution::degraded(IdentityDiagnostic::NoSession),
            Err(error) => {
                return Resolution::degraded(IdentityDiagnostic::SessionLookupFailed(error));
            }
        };

        let profile = match self.profiles.profile(user.id).await {
            Ok(profile) => profile,
            Err(error) => {
                return Resolution::degraded(IdentityDiagnostic::ProfileLookupFailed(error));
            }
        };

        match shape_identity(&user, profile.as_ref()) {
            Some(identity) => Resolution::resolved(identity),
            None => Resolution::degraded(IdentityDiagnostic::NothingToSend),
        }
    }
}

impl std::fmt::Debug for BuyerIdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuyerIdentityResolver").finish_non_exhaustive()
    }
}

/// Shape session and profile data into checkout pre-fill.
///
/// Returns `None` when there is no email, phone or delivery address to send.
pub fn shape_identity(
    user: &AuthenticatedUser,
    profile: Option<&Profile>,
) -> Option<BuyerIdentity> {
    let empty = Profile::default();
    let profile = profile.unwrap_or(&empty);

    let email = non_blank(user.email.as_deref());
    let phone = non_blank(profile.phone.as_deref());
    let country_code =
        non_blank(profile.country_code.as_deref()).map(|code| code.to_ascii_uppercase());

    let address1 = street_line(profile.street.as_deref(), profile.house_number.as_deref());
    let city = non_blank(profile.city.as_deref());
    let zip = non_blank(profile.postal_code.as_deref());

    let delivery_address_preferences = if address1.is_some() || city.is_some() || zip.is_some() {
        vec![DeliveryAddressPreference {
            delivery_address: DeliveryAddress {
                first_name: non_blank(profile.first_name.as_deref()),
                last_name: non_blank(profile.last_name.as_deref()),
                address1,
                city,
                zip,
                country: country_code.clone(),
            },
        }]
    } else {
        Vec::new()
    };

    if email.is_none() && phone.is_none() && delivery_address_preferences.is_empty() {
        return None;
    }

    Some(BuyerIdentity {
        email,
        phone,
        country_code,
        delivery_address_preferences,
    })
}

/// Join street and house number with a single space, skipping blank parts.
pub fn street_line(street: Option<&str>, house_number: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [street, house_number]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    (!parts.is_empty()).then(|| parts.join(" "))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}
