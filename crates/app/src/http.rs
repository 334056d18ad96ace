//! REST collaborator client (external HTTP backend).
//!
//! The alternate login/register flows talk to a plain REST backend. This
//! client owns no wire protocol — it injects the bearer token and optional
//! API key the way every request here must, and normalizes transport
//! failures into the auth error taxonomy.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use planboard_auth::{AuthError, AuthErrorKind, AuthToken};
use planboard_store::{SessionStore, cached_token};

use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: Option<String>,
    error: Option<String>,
}

/// HTTP client with bearer-token and API-key header injection.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: AppConfig,
    store: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(config: AppConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            store,
        }
    }

    /// Build a request with the standard headers attached: `x-api-key` when
    /// configured, `Authorization: Bearer …` when a token is persisted.
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!(
            "{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut builder = self.http.request(method, url);

        if let Some(api_key) = &self.config.api_key {
            builder = builder.header("x-api-key", api_key);
        }

        match cached_token(self.store.as_ref()) {
            Ok(Some(token)) => builder = builder.bearer_auth(token.as_str()),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "skipping bearer header: store read failed");
            }
        }

        builder
    }

    /// `POST /login` with credentials; yields the backend's bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthToken, AuthError> {
        self.token_request("login", email, password).await
    }

    /// `POST /register` with credentials; yields the backend's bearer token.
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthToken, AuthError> {
        self.token_request("register", email, password).await
    }

    async fn token_request(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthToken, AuthError> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(&CredentialsRequest { email, password })
            .send()
            .await
            .map_err(|err| {
                tracing::debug!(error = %err, "api request failed to send");
                AuthError::network()
            })?;

        let status = response.status();
        let body: TokenResponse = response.json().await.map_err(|err| {
            tracing::debug!(error = %err, "api response body unreadable");
            AuthError::network()
        })?;

        if status.is_success() {
            match body.token {
                Some(token) if !token.is_empty() => Ok(AuthToken::new(token)),
                _ => Err(AuthError::new(
                    AuthErrorKind::Provider,
                    "Login failed. Please check your credentials.",
                )),
            }
        } else {
            // The backend reports failures as `{ "error": "..." }`.
            Err(AuthError::new(
                AuthErrorKind::Provider,
                body.error
                    .unwrap_or_else(|| format!("Request failed with status {status}.")),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use planboard_store::{InMemorySessionStore, keys};

    fn client_with(config: AppConfig) -> (Arc<InMemorySessionStore>, ApiClient) {
        let store = Arc::new(InMemorySessionStore::new());
        let client = ApiClient::new(config, Arc::clone(&store) as _);
        (store, client)
    }

    #[test]
    fn bearer_header_is_injected_when_a_token_is_cached() {
        let (store, client) = client_with(AppConfig::default());
        store.set(keys::TOKEN, "tok-abc").unwrap();

        let request = client
            .request(reqwest::Method::GET, "/users")
            .build()
            .unwrap();

        let auth = request.headers().get(reqwest::header::AUTHORIZATION).unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer tok-abc");
    }

    #[test]
    fn no_authorization_header_without_a_cached_token() {
        let (_store, client) = client_with(AppConfig::default());

        let request = client
            .request(reqwest::Method::GET, "/users")
            .build()
            .unwrap();

        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn api_key_header_follows_configuration() {
        let (_store, client) = client_with(AppConfig {
            api_key: Some("key-123".to_string()),
            ..AppConfig::default()
        });

        let request = client
            .request(reqwest::Method::POST, "login")
            .build()
            .unwrap();

        assert_eq!(request.headers().get("x-api-key").unwrap(), "key-123");
        assert_eq!(request.url().as_str(), "https://reqres.in/api/login");
    }

    #[test]
    fn base_url_join_tolerates_slashes() {
        let (_store, client) = client_with(AppConfig {
            api_base_url: "https://api.example.com/".to_string(),
            api_key: None,
        });

        let request = client
            .request(reqwest::Method::GET, "/health")
            .build()
            .unwrap();

        assert_eq!(request.url().as_str(), "https://api.example.com/health");
    }
}
