//! Session manager: scoped ownership of the observer + sign-out.

use std::sync::Arc;

use planboard_auth::{AuthState, IdentityProvider};
use planboard_store::{SessionStore, clear_session};

use crate::SessionError;
use crate::observer::AuthStateObserver;

/// Owns the auth state observer for the lifetime of the application.
///
/// Construction subscribes to the provider and resolves the initial replay;
/// [`shutdown`](Self::shutdown) is the explicit teardown point (dropping the
/// manager has the same effect — the explicit form exists so teardown does
/// not depend on UI unmount timing).
pub struct SessionManager {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn SessionStore>,
    observer: Arc<AuthStateObserver>,
}

impl SessionManager {
    /// Subscribe to the provider and resolve the replayed initial state.
    pub fn start(provider: Arc<dyn IdentityProvider>, store: Arc<dyn SessionStore>) -> Self {
        let observer = Arc::new(AuthStateObserver::attach(
            provider.as_ref(),
            Arc::clone(&store),
        ));
        observer.reconcile_pending();

        Self {
            provider,
            store,
            observer,
        }
    }

    pub fn state(&self) -> AuthState {
        self.observer.snapshot()
    }

    pub fn observer(&self) -> &Arc<AuthStateObserver> {
        &self.observer
    }

    /// Drain and reconcile any queued provider notifications.
    pub fn reconcile_pending(&self) -> usize {
        self.observer.reconcile_pending()
    }

    /// Sign out: provider first, then make sure nothing lingers locally.
    ///
    /// Idempotent — signing out while already unauthenticated leaves the
    /// store empty and the state `Unauthenticated`. The direct store clear
    /// is the one permitted write outside the observer: it guarantees an
    /// empty store even if the provider's notification was dropped.
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        self.provider.sign_out().await?;
        self.observer.reconcile_pending();
        clear_session(self.store.as_ref())?;
        Ok(())
    }

    /// Deterministic teardown: drops the provider subscription.
    pub fn shutdown(self) {
        tracing::debug!("session manager shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use planboard_auth::{AuthState, EmailAddress, InMemoryIdentityProvider, Password};
    use planboard_store::{InMemorySessionStore, cached_token};

    async fn signed_in_manager() -> (Arc<InMemoryIdentityProvider>, Arc<InMemorySessionStore>, SessionManager) {
        let provider = Arc::new(InMemoryIdentityProvider::new());
        let eve = EmailAddress::parse("eve.holt@reqres.in").unwrap();
        provider.register(&eve, "cityslicka", Some("Eve Holt"));
        provider
            .sign_in_with_password(&eve, &Password::new("cityslicka").unwrap())
            .await
            .unwrap();

        let store = Arc::new(InMemorySessionStore::new());
        let manager = SessionManager::start(
            Arc::clone(&provider) as _,
            Arc::clone(&store) as _,
        );
        (provider, store, manager)
    }

    #[tokio::test]
    async fn start_resolves_the_initial_state() {
        let (_provider, store, manager) = signed_in_manager().await;
        assert!(manager.state().is_authenticated());
        assert!(cached_token(store.as_ref()).unwrap().is_some());
    }

    #[tokio::test]
    async fn sign_out_clears_state_and_store() {
        let (_provider, store, manager) = signed_in_manager().await;

        manager.sign_out().await.unwrap();

        assert_eq!(manager.state(), AuthState::Unauthenticated);
        assert!(cached_token(store.as_ref()).unwrap().is_none());
    }

    #[tokio::test]
    async fn sign_out_is_idempotent() {
        let (_provider, store, manager) = signed_in_manager().await;

        manager.sign_out().await.unwrap();
        manager.sign_out().await.unwrap();

        assert_eq!(manager.state(), AuthState::Unauthenticated);
        assert!(cached_token(store.as_ref()).unwrap().is_none());
    }

    #[tokio::test]
    async fn fresh_start_with_no_session_resolves_unauthenticated() {
        let provider = Arc::new(InMemoryIdentityProvider::new());
        let store = Arc::new(InMemorySessionStore::new());
        let manager = SessionManager::start(provider as _, store as _);

        assert_eq!(manager.state(), AuthState::Unauthenticated);
    }
}
