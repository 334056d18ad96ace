//! Auth error taxonomy, normalized at the provider boundary.
//!
//! Provider SDKs report failures as loosely-typed code strings. Those are
//! converted into the closed `AuthError` union immediately on receipt;
//! nothing deeper in the call stack branches on raw provider strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Provider failure code strings, as emitted by the identity provider SDK.
///
/// This is the closed set the error mapping recognizes; anything else falls
/// through to [`AuthErrorKind::Provider`] with the raw message preserved.
pub mod codes {
    pub const INVALID_CREDENTIAL: &str = "auth/invalid-credential";
    pub const USER_NOT_FOUND: &str = "auth/user-not-found";
    pub const WRONG_PASSWORD: &str = "auth/wrong-password";
    pub const TOO_MANY_REQUESTS: &str = "auth/too-many-requests";
    pub const EMAIL_ALREADY_IN_USE: &str = "auth/email-already-in-use";
    pub const WEAK_PASSWORD: &str = "auth/weak-password";
    pub const INVALID_EMAIL: &str = "auth/invalid-email";
}

/// Classification of an authentication failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthErrorKind {
    /// Rejected client-side before any provider interaction.
    Validation,
    InvalidCredential,
    UserNotFound,
    WrongPassword,
    TooManyRequests,
    EmailAlreadyInUse,
    WeakPassword,
    InvalidEmail,
    /// Provider unreachable.
    Network,
    /// Provider failure outside the closed code set.
    Provider,
}

/// A normalized authentication failure: a closed kind plus the message
/// shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AuthError {
    pub kind: AuthErrorKind,
    pub message: String,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// A client-side validation failure; `message` is already user-facing.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::Validation, message)
    }

    /// Provider unreachable.
    pub fn network() -> Self {
        Self::new(
            AuthErrorKind::Network,
            "Network error. Please check your internet connection.",
        )
    }

    /// Normalize a provider failure code into the closed taxonomy.
    ///
    /// Mapped codes get a fixed user-facing string; unmapped codes fall
    /// back to the raw provider message.
    pub fn from_provider_code(code: &str, raw_message: &str) -> Self {
        match code {
            codes::INVALID_CREDENTIAL => Self::new(
                AuthErrorKind::InvalidCredential,
                "Invalid email or password.",
            ),
            codes::USER_NOT_FOUND => Self::new(
                AuthErrorKind::UserNotFound,
                "No account found with this email.",
            ),
            codes::WRONG_PASSWORD => {
                Self::new(AuthErrorKind::WrongPassword, "Incorrect password.")
            }
            codes::TOO_MANY_REQUESTS => Self::new(
                AuthErrorKind::TooManyRequests,
                "Too many failed attempts. Try again later.",
            ),
            codes::EMAIL_ALREADY_IN_USE => Self::new(
                AuthErrorKind::EmailAlreadyInUse,
                "This email is already registered.",
            ),
            codes::WEAK_PASSWORD => Self::new(
                AuthErrorKind::WeakPassword,
                "Password must be at least 6 characters.",
            ),
            codes::INVALID_EMAIL => {
                Self::new(AuthErrorKind::InvalidEmail, "Invalid email format.")
            }
            _ => Self::new(AuthErrorKind::Provider, raw_message),
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind == AuthErrorKind::Validation
    }
}
