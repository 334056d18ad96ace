//! The dashboard's route table.

use serde::{Deserialize, Serialize};

/// Every navigable destination.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// `/` — pure dispatcher; redirects by auth state.
    Root,
    /// `/auth` — the combined sign-in/sign-up page.
    Auth,
    /// `/login` — standalone sign-in (alternate entry).
    Login,
    /// `/signup` — standalone sign-up (alternate entry).
    Signup,
    Dashboard,
    Projects,
    Tasks,
    Reports,
    Settings,
}

impl Route {
    pub const fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Auth => "/auth",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Dashboard => "/dashboard",
            Route::Projects => "/projects",
            Route::Tasks => "/tasks",
            Route::Reports => "/reports",
            Route::Settings => "/settings",
        }
    }

    /// Parse a requested path. Query and fragment are ignored; a trailing
    /// slash is tolerated. `None` means the catch-all applies.
    pub fn parse(requested: &str) -> Option<Route> {
        let path = requested
            .split(['?', '#'])
            .next()
            .unwrap_or(requested);
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        match path {
            "/" => Some(Route::Root),
            "/auth" => Some(Route::Auth),
            "/login" => Some(Route::Login),
            "/signup" => Some(Route::Signup),
            "/dashboard" => Some(Route::Dashboard),
            "/projects" => Some(Route::Projects),
            "/tasks" => Some(Route::Tasks),
            "/reports" => Some(Route::Reports),
            "/settings" => Some(Route::Settings),
            _ => None,
        }
    }

    /// Destinations that require an authenticated session.
    pub const fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Dashboard | Route::Projects | Route::Tasks | Route::Reports | Route::Settings
        )
    }

    /// Entry points into the auth forms.
    pub const fn is_auth_entry(&self) -> bool {
        matches!(self, Route::Auth | Route::Login | Route::Signup)
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

/// Where navigation should go next, and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTarget {
    pub path: String,
    /// Replace the current history entry instead of pushing (no
    /// back-navigation to the replaced view).
    pub replace: bool,
    /// The originally requested path, preserved across an auth redirect so
    /// the post-login landing can return there.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_to: Option<String>,
}

impl NavigationTarget {
    pub fn replace_to(route: Route) -> Self {
        Self {
            path: route.path().to_string(),
            replace: true,
            return_to: None,
        }
    }

    pub fn with_return_to(mut self, requested: impl Into<String>) -> Self {
        self.return_to = Some(requested.into());
        self
    }

    /// The landing target after a successful sign-in/sign-up.
    ///
    /// Returns to the originally requested path when it names a protected
    /// destination; anything else (absent, auth pages, unknown paths) lands
    /// on the dashboard. Always replaces history so the auth form is not
    /// reachable via back-navigation.
    pub fn post_login(return_to: Option<&str>) -> Self {
        let destination = return_to
            .and_then(Route::parse)
            .filter(Route::is_protected)
            .unwrap_or(Route::Dashboard);
        Self::replace_to(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_full_route_table() {
        for route in [
            Route::Root,
            Route::Auth,
            Route::Login,
            Route::Signup,
            Route::Dashboard,
            Route::Projects,
            Route::Tasks,
            Route::Reports,
            Route::Settings,
        ] {
            assert_eq!(Route::parse(route.path()), Some(route));
        }
    }

    #[test]
    fn tolerates_trailing_slash_query_and_fragment() {
        assert_eq!(Route::parse("/dashboard/"), Some(Route::Dashboard));
        assert_eq!(Route::parse("/tasks?filter=open"), Some(Route::Tasks));
        assert_eq!(Route::parse("/reports#weekly"), Some(Route::Reports));
    }

    #[test]
    fn unknown_paths_hit_the_catch_all() {
        assert_eq!(Route::parse("/nope"), None);
        assert_eq!(Route::parse(""), None);
        assert_eq!(Route::parse("dashboard"), None);
    }

    #[test]
    fn post_login_returns_to_a_protected_path() {
        let target = NavigationTarget::post_login(Some("/reports"));
        assert_eq!(target.path, "/reports");
        assert!(target.replace);
    }

    #[test]
    fn post_login_never_lands_on_an_auth_page() {
        for requested in [None, Some("/auth"), Some("/login"), Some("/bogus")] {
            let target = NavigationTarget::post_login(requested);
            assert_eq!(target.path, "/dashboard", "{requested:?}");
            assert!(target.replace);
        }
    }
}
