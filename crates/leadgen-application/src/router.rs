//! Current-screen tracking.

use leadgen_core::navigation::{NavigationIntent, Route};

use crate::guard::GuardDecision;

/// Holds the current route and applies guard decisions and navigation
/// intents to it.
///
/// Redirecting to the route already shown is a no-op, so repeated intents
/// (for example several 401s in a row) never loop.
#[derive(Debug, Clone)]
pub struct Router {
    current: Route,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::home())
    }
}

impl Router {
    pub fn new(start: Route) -> Self {
        Self { current: start }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Moves to `target`. Returns `false` if already there.
    pub fn navigate(&mut self, target: Route) -> bool {
        if self.current == target {
            return false;
        }
        tracing::debug!(from = %self.current, to = %target, "Navigating");
        self.current = target;
        true
    }

    /// Applies a navigation intent from the session store.
    pub fn apply_intent(&mut self, intent: NavigationIntent) -> bool {
        self.navigate(intent.target)
    }

    /// Moves to whatever route a guard decision shows.
    ///
    /// `Loading` leaves the current route untouched. Returns the new route
    /// if it changed.
    pub fn apply(&mut self, decision: GuardDecision) -> Option<Route> {
        match decision {
            GuardDecision::Render(route) | GuardDecision::Redirect(route) => {
                self.navigate(route).then_some(route)
            }
            GuardDecision::Loading => None,
        }
    }
}
