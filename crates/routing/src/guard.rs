//! Route guard: gate navigation on the resolved auth state.

use planboard_auth::AuthState;

use crate::route::{NavigationTarget, Route};

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Auth state still resolving; render a neutral pending indicator.
    /// Never redirect from here — that produces a flash-redirect race.
    Pending,
    Redirect(NavigationTarget),
    Render(Route),
}

/// Decide whether to render `requested`, redirect, or hold.
///
/// Pure function of (state, path):
/// - No IO, no panics.
/// - `Unknown` always yields `Pending`, whatever the path.
/// - Catch-all and `/` resolve in two steps, like the original route table:
///   unknown paths redirect to `/`, and `/` redirects by auth state. The
///   caller re-enters `decide` with each redirect target.
pub fn decide(state: &AuthState, requested: &str) -> RouteDecision {
    if !state.is_resolved() {
        return RouteDecision::Pending;
    }

    let Some(route) = Route::parse(requested) else {
        return RouteDecision::Redirect(NavigationTarget::replace_to(Route::Root));
    };

    let authenticated = state.is_authenticated();
    match route {
        Route::Root => {
            let destination = if authenticated { Route::Dashboard } else { Route::Auth };
            RouteDecision::Redirect(NavigationTarget::replace_to(destination))
        }
        route if route.is_auth_entry() => {
            if authenticated {
                RouteDecision::Redirect(NavigationTarget::replace_to(Route::Dashboard))
            } else {
                RouteDecision::Render(route)
            }
        }
        route => {
            // Protected destination.
            if authenticated {
                RouteDecision::Render(route)
            } else {
                RouteDecision::Redirect(
                    NavigationTarget::replace_to(Route::Auth).with_return_to(requested),
                )
            }
        }
    }
}
