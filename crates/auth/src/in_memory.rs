//! In-memory identity provider for tests/dev.
//!
//! Deterministic, no IO. Failures are produced through the same
//! provider-code normalization path a real SDK adapter would use, so tests
//! exercise the boundary mapping rather than bypassing it.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use planboard_core::UserId;
use planboard_events::{InMemoryBus, NotificationBus, Subscription};

use crate::credentials::{EmailAddress, MIN_PASSWORD_LEN, Password};
use crate::error::{AuthError, codes};
use crate::provider::{IdentityProvider, OAuthProviderId, SessionChange};
use crate::session::{AuthProviderKind, AuthToken, Session};

/// Consecutive wrong-password failures before the throttle kicks in.
const MAX_FAILED_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone)]
struct AccountRecord {
    user_id: UserId,
    password: String,
    display_name: Option<String>,
}

#[derive(Debug, Default)]
struct ProviderInner {
    accounts: HashMap<String, AccountRecord>,
    current: Option<Session>,
    failed_attempts: HashMap<String, u32>,
    oauth_identity: Option<(EmailAddress, String)>,
}

/// In-process identity provider double.
///
/// - Accounts are seeded with [`register`](Self::register) or created via
///   `sign_up_with_password`.
/// - `set_offline(true)` makes every provider call fail as a network error.
/// - Session changes are replayed to new subscribers, then pushed live, in
///   emission order.
#[derive(Default)]
pub struct InMemoryIdentityProvider {
    inner: Mutex<ProviderInner>,
    changes: InMemoryBus<SessionChange>,
    offline: AtomicBool,
    sign_in_calls: AtomicUsize,
    sign_up_calls: AtomicUsize,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account without emitting any session change.
    pub fn register(&self, email: &EmailAddress, password: &str, display_name: Option<&str>) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.accounts.insert(
                email.as_str().to_string(),
                AccountRecord {
                    user_id: UserId::new(),
                    password: password.to_string(),
                    display_name: display_name.map(str::to_string),
                },
            );
        }
    }

    /// Configure the identity the OAuth popup will resolve to.
    pub fn set_oauth_identity(&self, email: EmailAddress, display_name: &str) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.oauth_identity = Some((email, display_name.to_string()));
        }
    }

    /// Simulate the provider being unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of password sign-in attempts that reached the provider.
    ///
    /// Used by tests asserting the duplicate-submit guard: two rapid
    /// submits must produce exactly one provider call.
    pub fn sign_in_call_count(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    /// Number of sign-up attempts that reached the provider. Local
    /// validation failures must keep this at zero.
    pub fn sign_up_call_count(&self) -> usize {
        self.sign_up_calls.load(Ordering::SeqCst)
    }

    pub fn current_session(&self) -> Option<Session> {
        self.inner.lock().ok().and_then(|inner| inner.current.clone())
    }

    fn ensure_online(&self) -> Result<(), AuthError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(AuthError::network())
        } else {
            Ok(())
        }
    }

    fn lock_inner(&self) -> Result<std::sync::MutexGuard<'_, ProviderInner>, AuthError> {
        self.inner
            .lock()
            .map_err(|_| AuthError::from_provider_code("auth/internal-error", "provider state poisoned"))
    }

    fn mint_session(
        account: &AccountRecord,
        email: &EmailAddress,
        provider: AuthProviderKind,
    ) -> Session {
        Session {
            user_id: account.user_id,
            email: email.clone(),
            display_name: account.display_name.clone(),
            token: AuthToken::new(format!("tok-{}", Uuid::now_v7())),
            provider,
        }
    }

    fn publish(&self, change: SessionChange) {
        if self.changes.publish(change).is_err() {
            tracing::warn!("session change dropped: notification bus poisoned");
        }
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_in_with_password(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<Session, AuthError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;

        let session = {
            let mut inner = self.lock_inner()?;

            let Some(account) = inner.accounts.get(email.as_str()).cloned() else {
                return Err(AuthError::from_provider_code(
                    codes::USER_NOT_FOUND,
                    "EMAIL_NOT_FOUND",
                ));
            };

            if account.password != password.as_str() {
                let attempts = inner
                    .failed_attempts
                    .entry(email.as_str().to_string())
                    .or_insert(0);
                *attempts += 1;

                let code = if *attempts >= MAX_FAILED_ATTEMPTS {
                    codes::TOO_MANY_REQUESTS
                } else {
                    codes::WRONG_PASSWORD
                };
                return Err(AuthError::from_provider_code(code, "INVALID_PASSWORD"));
            }

            inner.failed_attempts.remove(email.as_str());
            let session = Self::mint_session(&account, email, AuthProviderKind::Password);
            inner.current = Some(session.clone());
            session
        };

        self.publish(SessionChange::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_up_with_password(
        &self,
        email: &EmailAddress,
        password: &Password,
        display_name: Option<&str>,
    ) -> Result<Session, AuthError> {
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;

        let session = {
            let mut inner = self.lock_inner()?;

            if inner.accounts.contains_key(email.as_str()) {
                return Err(AuthError::from_provider_code(
                    codes::EMAIL_ALREADY_IN_USE,
                    "EMAIL_EXISTS",
                ));
            }
            // Client-side validation normally catches this first; the
            // provider enforces it independently.
            if password.as_str().chars().count() < MIN_PASSWORD_LEN {
                return Err(AuthError::from_provider_code(
                    codes::WEAK_PASSWORD,
                    "WEAK_PASSWORD",
                ));
            }

            let account = AccountRecord {
                user_id: UserId::new(),
                password: password.as_str().to_string(),
                display_name: display_name.map(str::to_string),
            };
            let session = Self::mint_session(&account, email, AuthProviderKind::Password);
            inner.accounts.insert(email.as_str().to_string(), account);
            inner.current = Some(session.clone());
            session
        };

        self.publish(SessionChange::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_in_with_oauth_popup(
        &self,
        _provider_id: &OAuthProviderId,
    ) -> Result<Session, AuthError> {
        self.ensure_online()?;

        let session = {
            let mut inner = self.lock_inner()?;

            let Some((email, display_name)) = inner.oauth_identity.clone() else {
                // No configured identity behaves like the user dismissing
                // the popup; the code is outside the closed set on purpose.
                return Err(AuthError::from_provider_code(
                    "auth/popup-closed-by-user",
                    "The popup has been closed by the user.",
                ));
            };

            let account = inner
                .accounts
                .entry(email.as_str().to_string())
                .or_insert_with(|| AccountRecord {
                    user_id: UserId::new(),
                    password: String::new(),
                    display_name: Some(display_name.clone()),
                });
            account.display_name = Some(display_name);
            let record = account.clone();

            let session = Self::mint_session(&record, &email, AuthProviderKind::OAuth);
            inner.current = Some(session.clone());
            session
        };

        self.publish(SessionChange::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        {
            let mut inner = self.lock_inner()?;
            inner.current = None;
        }
        // The real SDK notifies on every sign-out, including redundant
        // ones; the observer deduplicates.
        self.publish(SessionChange::SignedOut);
        Ok(())
    }

    fn subscribe_session_changes(&self) -> Subscription<SessionChange> {
        let seed = match self.inner.lock() {
            Ok(inner) => Some(match &inner.current {
                Some(session) => SessionChange::SignedIn(session.clone()),
                None => SessionChange::SignedOut,
            }),
            Err(_) => None,
        };
        self.changes.subscribe_seeded(seed)
    }

    async fn fresh_token(&self, force_refresh: bool) -> Result<AuthToken, AuthError> {
        self.ensure_online()?;

        let mut inner = self.lock_inner()?;
        let Some(session) = inner.current.as_mut() else {
            return Err(AuthError::from_provider_code(
                "auth/no-current-user",
                "No user is currently signed in.",
            ));
        };

        if force_refresh {
            session.token = AuthToken::new(format!("tok-{}", Uuid::now_v7()));
        }
        Ok(session.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthErrorKind;

    fn email(raw: &str) -> EmailAddress {
        EmailAddress::parse(raw).unwrap()
    }

    fn provider_with_account() -> InMemoryIdentityProvider {
        let provider = InMemoryIdentityProvider::new();
        provider.register(&email("eve.holt@reqres.in"), "cityslicka", None);
        provider
    }

    #[tokio::test]
    async fn sign_in_issues_a_session_and_notifies() {
        let provider = provider_with_account();
        let sub = provider.subscribe_session_changes();
        // Drain the initial replay (signed out).
        assert_eq!(sub.try_recv().unwrap(), SessionChange::SignedOut);

        let session = provider
            .sign_in_with_password(&email("eve.holt@reqres.in"), &Password::new("cityslicka").unwrap())
            .await
            .unwrap();

        assert!(!session.token.is_empty());
        assert_eq!(sub.try_recv().unwrap(), SessionChange::SignedIn(session));
    }

    #[tokio::test]
    async fn unknown_email_maps_to_user_not_found() {
        let provider = provider_with_account();
        let err = provider
            .sign_in_with_password(&email("nobody@example.com"), &Password::new("pw").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::UserNotFound);
    }

    #[tokio::test]
    async fn repeated_wrong_passwords_trip_the_throttle() {
        let provider = provider_with_account();
        let eve = email("eve.holt@reqres.in");
        let wrong = Password::new("nope").unwrap();

        for _ in 0..4 {
            let err = provider.sign_in_with_password(&eve, &wrong).await.unwrap_err();
            assert_eq!(err.kind, AuthErrorKind::WrongPassword);
        }
        let err = provider.sign_in_with_password(&eve, &wrong).await.unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::TooManyRequests);
    }

    #[tokio::test]
    async fn duplicate_sign_up_is_rejected() {
        let provider = provider_with_account();
        let err = provider
            .sign_up_with_password(
                &email("eve.holt@reqres.in"),
                &Password::new_for_signup("cityslicka").unwrap(),
                None,
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::EmailAlreadyInUse);
    }

    #[tokio::test]
    async fn offline_provider_fails_with_network_error() {
        let provider = provider_with_account();
        provider.set_offline(true);

        let err = provider
            .sign_in_with_password(&email("eve.holt@reqres.in"), &Password::new("cityslicka").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::Network);
    }

    #[tokio::test]
    async fn subscriber_replay_reflects_a_live_session() {
        let provider = provider_with_account();
        let session = provider
            .sign_in_with_password(&email("eve.holt@reqres.in"), &Password::new("cityslicka").unwrap())
            .await
            .unwrap();

        let sub = provider.subscribe_session_changes();
        assert_eq!(sub.try_recv().unwrap(), SessionChange::SignedIn(session));
    }

    #[tokio::test]
    async fn fresh_token_rotates_only_on_forced_refresh() {
        let provider = provider_with_account();
        provider
            .sign_in_with_password(&email("eve.holt@reqres.in"), &Password::new("cityslicka").unwrap())
            .await
            .unwrap();

        let first = provider.fresh_token(false).await.unwrap();
        let second = provider.fresh_token(false).await.unwrap();
        assert_eq!(first, second);

        let rotated = provider.fresh_token(true).await.unwrap();
        assert_ne!(first, rotated);
    }

    #[tokio::test]
    async fn oauth_popup_resolves_the_configured_identity() {
        let provider = InMemoryIdentityProvider::new();
        provider.set_oauth_identity(email("eve.holt@reqres.in"), "Eve Holt");

        let session = provider
            .sign_in_with_oauth_popup(&OAuthProviderId::GOOGLE)
            .await
            .unwrap();
        assert_eq!(session.provider, AuthProviderKind::OAuth);
        assert_eq!(session.display_name.as_deref(), Some("Eve Holt"));
    }

    #[tokio::test]
    async fn dismissed_popup_falls_back_to_the_raw_provider_message() {
        let provider = InMemoryIdentityProvider::new();
        let err = provider
            .sign_in_with_oauth_popup(&OAuthProviderId::GOOGLE)
            .await
            .unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::Provider);
        assert_eq!(err.message, "The popup has been closed by the user.");
    }
}
