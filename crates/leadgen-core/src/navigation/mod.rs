//! Routes and navigation intents.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The application's screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Route {
    /// Anonymous entry point
    Login,
    Dashboard,
    Sellers,
    Brands,
    Qa,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/",
            Route::Sellers => "/sellers",
            Route::Brands => "/brands",
            Route::Qa => "/qa",
        }
    }

    /// Resolves a path. Unknown paths fall through to the dashboard.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = trimmed.trim_end_matches('/');
        match normalized {
            "" => Route::Dashboard,
            "/login" => Route::Login,
            "/sellers" => Route::Sellers,
            "/brands" => Route::Brands,
            "/qa" => Route::Qa,
            _ => Route::Dashboard,
        }
    }

    /// Whether the route requires an authenticated session.
    pub fn is_protected(self) -> bool {
        self != Route::Login
    }

    /// The anonymous entry point.
    pub fn anonymous_entry() -> Self {
        Route::Login
    }

    /// Landing route after sign-in.
    pub fn home() -> Self {
        Route::Dashboard
    }
}

/// Why a navigation was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RedirectReason {
    Logout,
    Unauthorized,
    SignedIn,
}

/// A request from the session store to the router to change screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationIntent {
    pub target: Route,
    pub reason: RedirectReason,
}

impl NavigationIntent {
    pub fn new(target: Route, reason: RedirectReason) -> Self {
        Self { target, reason }
    }

    pub fn to_login(reason: RedirectReason) -> Self {
        Self::new(Route::anonymous_entry(), reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_paths_round_trip() {
        for route in Route::iter() {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn test_unknown_path_falls_back_to_dashboard() {
        assert_eq!(Route::from_path("/nope"), Route::Dashboard);
        assert_eq!(Route::from_path("/sellers/"), Route::Sellers);
    }

    #[test]
    fn test_only_login_is_public() {
        assert!(!Route::Login.is_protected());
        assert!(Route::Qa.is_protected());
        assert!(Route::Dashboard.is_protected());
    }
}
