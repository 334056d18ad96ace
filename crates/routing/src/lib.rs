//! `planboard-routing` — route table and the auth route guard.
//!
//! The guard is a pure decision function of (auth state, requested path);
//! it performs no IO and never redirects while the auth state is still
//! unresolved.

pub mod guard;
pub mod route;

pub use guard::{RouteDecision, decide};
pub use route::{NavigationTarget, Route};
