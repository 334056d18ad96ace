//! Identity provider capability (external collaborator).
//!
//! Credential verification, session issuance and OAuth popup flows all
//! happen inside the provider. This crate consumes them through the trait
//! below and never reimplements them.

use std::borrow::Cow;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use planboard_events::Subscription;

use crate::credentials::{EmailAddress, Password};
use crate::error::AuthError;
use crate::session::{AuthToken, Session};

/// Identifier of an OAuth provider understood by the identity service
/// (e.g. `google.com`). Opaque at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OAuthProviderId(Cow<'static, str>);

impl OAuthProviderId {
    pub const GOOGLE: OAuthProviderId = OAuthProviderId(Cow::Borrowed("google.com"));

    pub fn new(id: impl Into<Cow<'static, str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OAuthProviderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A session-change notification pushed by the identity provider.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionChange {
    /// A principal is signed in (initial replay or a live sign-in).
    SignedIn(Session),
    /// No principal (initial replay or a live sign-out/invalidation).
    SignedOut,
}

/// The identity provider capability.
///
/// Every method that talks to the provider is a suspension point; callers
/// must guard against duplicate submissions for the duration (see the flow
/// machines) and must not mutate state from completions that land after
/// their owning view is gone.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_with_password(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<Session, AuthError>;

    async fn sign_up_with_password(
        &self,
        email: &EmailAddress,
        password: &Password,
        display_name: Option<&str>,
    ) -> Result<Session, AuthError>;

    async fn sign_in_with_oauth_popup(
        &self,
        provider_id: &OAuthProviderId,
    ) -> Result<Session, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Subscribe to session-change notifications.
    ///
    /// The current principal state is replayed to the new subscriber first,
    /// then live transitions follow in emission order.
    fn subscribe_session_changes(&self) -> Subscription<SessionChange>;

    /// Fetch the current session's bearer token, optionally forcing a
    /// refresh against the provider.
    async fn fresh_token(&self, force_refresh: bool) -> Result<AuthToken, AuthError>;
}
