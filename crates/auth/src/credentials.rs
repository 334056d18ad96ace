//! Credential value objects with client-side validation.
//!
//! Validation here is deliberately shallow — it exists to reject obviously
//! malformed input before any provider round-trip, not to duplicate the
//! provider's own checks.

use serde::{Deserialize, Serialize};

use planboard_core::{DomainError, ValueObject};

/// Minimum accepted password length for new accounts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A syntactically plausible email address.
///
/// Accepts `local@domain.tld` shapes: no whitespace, a non-empty local
/// part, and a domain containing a dot with non-empty pieces. Anything
/// stricter belongs to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("email is empty"));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(DomainError::validation("email contains whitespace"));
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(DomainError::validation("email is missing '@'"));
        };
        if local.is_empty() {
            return Err(DomainError::validation("email local part is empty"));
        }
        let Some((host, tld)) = domain.rsplit_once('.') else {
            return Err(DomainError::validation("email domain is missing '.'"));
        };
        if host.is_empty() || tld.is_empty() {
            return Err(DomainError::validation("email domain is malformed"));
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for EmailAddress {}

impl core::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A raw password held in memory for the duration of a submission.
///
/// Never serialized, never persisted; `Debug` is redacted so the value
/// stays out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Accept any non-empty password (sign-in path — existing accounts may
    /// predate the current length policy).
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty() {
            return Err(DomainError::validation("password is empty"));
        }
        Ok(Self(raw.to_string()))
    }

    /// Accept a password for account creation (length policy enforced).
    pub fn new_for_signup(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty() {
            return Err(DomainError::validation("password is empty"));
        }
        if raw.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation("password is too short"));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Password {}

impl core::fmt::Debug for Password {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}
