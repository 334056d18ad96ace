//! `planboard-app` — composition shell for the dashboard client.
//!
//! Wires the identity provider, session store, observer and route guard
//! together, and hosts the async flow drivers plus the HTTP collaborator
//! used by the REST-backed alternate flows.

pub mod config;
pub mod context;
pub mod dashboard;
pub mod driver;
pub mod http;

pub use config::AppConfig;
pub use context::AppContext;
pub use driver::FlowHandle;
pub use http::ApiClient;
