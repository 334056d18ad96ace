//! Session data model: the authenticated principal plus its bearer token.

use serde::{Deserialize, Serialize};

use planboard_core::{Entity, UserId};

use crate::credentials::EmailAddress;

/// Opaque bearer token issued by the identity provider.
///
/// The token is never inspected client-side; expiry and revocation are
/// provider concerns. `Debug` is redacted so tokens stay out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Which authentication path issued the session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthProviderKind {
    Password,
    OAuth,
}

impl core::fmt::Display for AuthProviderKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AuthProviderKind::Password => f.write_str("password"),
            AuthProviderKind::OAuth => f.write_str("oauth"),
        }
    }
}

/// The authenticated principal's identity for the current sign-in.
///
/// # Invariants
/// - Created only by the identity provider (or its in-memory double).
/// - Owned by the session store/observer; shell components hold read
///   snapshots only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub email: EmailAddress,
    /// Display name as reported by the provider; `None` when the provider
    /// has no profile name (e.g. fresh email/password accounts).
    pub display_name: Option<String>,
    pub token: AuthToken,
    pub provider: AuthProviderKind,
}

impl Entity for Session {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.user_id
    }
}

/// Serialized user profile persisted under the store's `user` key.
///
/// This is the reload-surviving subset of a session: enough to render the
/// shell (greeting, avatar initials) before the provider re-confirms the
/// principal. `role` is carried opportunistically — some sign-up flows
/// record one, nothing else assigns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl UserRecord {
    /// Fallback display name when neither the provider nor the cache has one.
    pub const FALLBACK_NAME: &'static str = "User";

    /// Build the persistable profile for a session, preferring provider
    /// values and falling back to a previously cached record.
    pub fn for_session(session: &Session, cached: Option<&UserRecord>) -> Self {
        let name = session
            .display_name
            .clone()
            .or_else(|| cached.map(|c| c.name.clone()))
            .unwrap_or_else(|| Self::FALLBACK_NAME.to_string());

        Self {
            name,
            email: session.email.as_str().to_string(),
            role: cached.and_then(|c| c.role.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(display_name: Option<&str>) -> Session {
        Session {
            user_id: UserId::new(),
            email: EmailAddress::parse("eve.holt@reqres.in").unwrap(),
            display_name: display_name.map(str::to_string),
            token: AuthToken::new("tok-1"),
            provider: AuthProviderKind::Password,
        }
    }

    #[test]
    fn provider_display_name_wins_over_cache() {
        let cached = UserRecord {
            name: "Cached Name".to_string(),
            email: "eve.holt@reqres.in".to_string(),
            role: Some("Employee".to_string()),
        };

        let record = UserRecord::for_session(&session(Some("Eve Holt")), Some(&cached));
        assert_eq!(record.name, "Eve Holt");
        // The provider knows nothing about roles; the cached value survives.
        assert_eq!(record.role.as_deref(), Some("Employee"));
    }

    #[test]
    fn cache_fills_in_missing_display_name() {
        let cached = UserRecord {
            name: "Cached Name".to_string(),
            email: "eve.holt@reqres.in".to_string(),
            role: None,
        };

        let record = UserRecord::for_session(&session(None), Some(&cached));
        assert_eq!(record.name, "Cached Name");
    }

    #[test]
    fn falls_back_to_placeholder_name() {
        let record = UserRecord::for_session(&session(None), None);
        assert_eq!(record.name, UserRecord::FALLBACK_NAME);
    }

    #[test]
    fn role_is_omitted_from_json_when_absent() {
        let record = UserRecord::for_session(&session(Some("Eve")), None);
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("role"));
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = AuthToken::new("secret-bearer");
        assert_eq!(format!("{token:?}"), "AuthToken(<redacted>)");
    }
}
