//! Application context: scoped wiring of provider, store, session, routes.

use std::sync::Arc;

use planboard_auth::{AuthState, IdentityProvider};
use planboard_routing::{RouteDecision, decide};
use planboard_session::{SessionError, SessionManager};
use planboard_store::SessionStore;

use crate::config::AppConfig;
use crate::http::ApiClient;

/// Owns everything with a lifecycle.
///
/// `start` subscribes to the provider and resolves the initial auth state;
/// `shutdown` is the explicit teardown point. Shell components borrow the
/// context — they never own session state themselves.
pub struct AppContext {
    config: AppConfig,
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn SessionStore>,
    manager: SessionManager,
    api: ApiClient,
}

impl AppContext {
    pub fn start(
        config: AppConfig,
        provider: Arc<dyn IdentityProvider>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        let manager = SessionManager::start(Arc::clone(&provider), Arc::clone(&store));
        let api = ApiClient::new(config.clone(), Arc::clone(&store));

        tracing::info!(state = %manager.state(), "application context started");

        Self {
            config,
            provider,
            store,
            manager,
            api,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn provider(&self) -> &Arc<dyn IdentityProvider> {
        &self.provider
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn manager(&self) -> &SessionManager {
        &self.manager
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Current auth state snapshot (drains pending provider notifications
    /// first, so the decision below never runs on stale state).
    pub fn auth_state(&self) -> AuthState {
        self.manager.reconcile_pending();
        self.manager.state()
    }

    /// Route guard decision for a requested path.
    pub fn decide_route(&self, requested: &str) -> RouteDecision {
        decide(&self.auth_state(), requested)
    }

    pub async fn sign_out(&self) -> Result<(), SessionError> {
        self.manager.sign_out().await
    }

    /// Explicit teardown (drops the provider subscription).
    pub fn shutdown(self) {
        self.manager.shutdown();
        tracing::info!("application context shut down");
    }
}
