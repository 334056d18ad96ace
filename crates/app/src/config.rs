//! Application configuration.

/// Default REST collaborator base URL (placeholder backend).
pub const DEFAULT_API_BASE_URL: &str = "https://reqres.in/api";

/// Client configuration for the composition shell.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the REST collaborator.
    pub api_base_url: String,
    /// Optional API key sent as `x-api-key` on every request.
    pub api_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from `PLANBOARD_API_URL` / `PLANBOARD_API_KEY`,
    /// falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: lookup("PLANBOARD_API_URL").unwrap_or(defaults.api_base_url),
            api_key: lookup("PLANBOARD_API_KEY"),
        }
    }
}
