//! Resolved authentication status of the current session.

use crate::session::Session;

/// Tri-state auth status.
///
/// # Invariants
/// - Starts `Unknown` and resolves exactly once to `Authenticated` or
///   `Unauthenticated`; thereafter transitions only between the two
///   resolved states on sign-in/sign-out.
/// - Exactly one holder (the auth state observer); consumers read
///   snapshots and never mutate.
/// - No consumer may render protected content while `Unknown`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    /// Initial state; resolution against the provider is pending.
    #[default]
    Unknown,
    Authenticated(Session),
    Unauthenticated,
}

impl AuthState {
    /// Whether the state has resolved past `Unknown`.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, AuthState::Unknown)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    /// The current session, when authenticated.
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

impl core::fmt::Display for AuthState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AuthState::Unknown => f.write_str("unknown"),
            AuthState::Authenticated(session) => {
                write!(f, "authenticated({})", session.email)
            }
            AuthState::Unauthenticated => f.write_str("unauthenticated"),
        }
    }
}
