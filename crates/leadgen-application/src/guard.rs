//! Route guard.
//!
//! Decides, from the session status alone, whether a requested screen is
//! rendered, redirected, or held behind a loading indicator.

use leadgen_core::navigation::Route;
use leadgen_core::session::{Session, SessionStatus};
use tokio::sync::watch;

/// Outcome of guarding a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Status not resolved yet; show a neutral loading indicator.
    Loading,
    /// Show the requested route.
    Render(Route),
    /// Replace the requested route with another.
    Redirect(Route),
}

/// Pure guard rule.
///
/// Protected routes render only when authenticated. The login route renders
/// for anonymous users and sends authenticated users home. Nothing renders
/// while the status is unresolved.
pub fn decide(status: SessionStatus, requested: Route) -> GuardDecision {
    match status {
        SessionStatus::Unknown | SessionStatus::Verifying => GuardDecision::Loading,
        SessionStatus::Authenticated if requested.is_protected() => {
            GuardDecision::Render(requested)
        }
        SessionStatus::Authenticated => GuardDecision::Redirect(Route::home()),
        SessionStatus::Anonymous if requested.is_protected() => {
            GuardDecision::Redirect(Route::anonymous_entry())
        }
        SessionStatus::Anonymous => GuardDecision::Render(requested),
    }
}

/// Applies [`decide`] to a live session.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: watch::Receiver<Session>,
}

impl RouteGuard {
    pub fn new(session: watch::Receiver<Session>) -> Self {
        Self { session }
    }

    /// Decision for `requested` against the current status.
    pub fn check(&self, requested: Route) -> GuardDecision {
        decide(self.session.borrow().status(), requested)
    }

    /// Waits for the status to resolve, then decides.
    pub async fn admit(&mut self, requested: Route) -> GuardDecision {
        let resolved = self
            .session
            .wait_for(|s| s.status().is_resolved())
            .await
            .map(|session| session.status())
            .ok();
        match resolved {
            Some(status) => decide(status, requested),
            None => self.check(requested),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadgen_core::user::UserProfile;
    use strum::IntoEnumIterator;

    #[test]
    fn test_unresolved_never_renders() {
        for route in Route::iter() {
            assert_eq!(decide(SessionStatus::Unknown, route), GuardDecision::Loading);
            assert_eq!(decide(SessionStatus::Verifying, route), GuardDecision::Loading);
        }
    }

    #[test]
    fn test_anonymous_is_sent_to_login() {
        assert_eq!(
            decide(SessionStatus::Anonymous, Route::Sellers),
            GuardDecision::Redirect(Route::Login)
        );
        assert_eq!(
            decide(SessionStatus::Anonymous, Route::Login),
            GuardDecision::Render(Route::Login)
        );
    }

    #[test]
    fn test_authenticated_renders_and_skips_login() {
        assert_eq!(
            decide(SessionStatus::Authenticated, Route::Qa),
            GuardDecision::Render(Route::Qa)
        );
        assert_eq!(
            decide(SessionStatus::Authenticated, Route::Login),
            GuardDecision::Redirect(Route::Dashboard)
        );
    }

    #[tokio::test]
    async fn test_admit_waits_for_resolution() {
        let (tx, rx) = watch::channel(Session::unknown());
        let mut guard = RouteGuard::new(rx);
        assert_eq!(guard.check(Route::Brands), GuardDecision::Loading);

        let waiter = tokio::spawn(async move { guard.admit(Route::Brands).await });
        tx.send_replace(Session::authenticated(UserProfile::fallback("admin"), "abc").unwrap());

        assert_eq!(waiter.await.unwrap(), GuardDecision::Render(Route::Brands));
    }
}
