//! `planboard-session` — single source of truth for `AuthState`.
//!
//! The [`AuthStateObserver`] subscribes to the identity provider's
//! session-change notifications and reconciles each one with the session
//! store before any listener sees the transition. The [`SessionManager`]
//! owns the observer with an explicit start/shutdown lifecycle.

pub mod manager;
pub mod observer;

pub use manager::SessionManager;
pub use observer::{AuthStateObserver, ListenerGuard};

use thiserror::Error;

use planboard_auth::AuthError;
use planboard_store::StoreError;

/// Failures surfaced by session lifecycle operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Provider(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
