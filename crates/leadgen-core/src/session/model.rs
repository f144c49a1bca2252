//! Session domain model.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::error::{LeadgenError, Result};
use crate::user::UserProfile;

/// Authentication status of the client.
///
/// ```text
/// Unknown ──restore──▶ Verifying ──▶ Authenticated | Anonymous
///    └────restore────▶ Anonymous
/// Authenticated ──logout / verify failure / 401──▶ Anonymous
/// Anonymous ──login──▶ Authenticated
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    Unknown,
    Verifying,
    Authenticated,
    Anonymous,
}

impl SessionStatus {
    /// Whether the status is final enough for the route guard to decide.
    pub fn is_resolved(self) -> bool {
        matches!(self, Self::Authenticated | Self::Anonymous)
    }

    /// Whether `self → next` is an edge of the lifecycle.
    ///
    /// Login may overwrite any state, so `* → Authenticated` is always
    /// allowed. `Verifying` is only entered from `Unknown` or on a fresh
    /// restore after the session was reset.
    pub fn can_transition_to(self, next: SessionStatus) -> bool {
        use SessionStatus::*;
        match (self, next) {
            (_, Authenticated) => true,
            (_, Anonymous) => true,
            (Unknown | Anonymous, Verifying) => true,
            (_, Unknown) => false,
            (Verifying | Authenticated, Verifying) => false,
        }
    }
}

/// The client's current authentication state.
///
/// Fields are private so that the `Authenticated ⇔ user ∧ token` invariant
/// can only be established through the constructors below.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: Option<UserProfile>,
    token: Option<String>,
    status: SessionStatus,
}

impl Default for Session {
    fn default() -> Self {
        Self::unknown()
    }
}

impl Session {
    /// Initial state before storage has been read.
    pub fn unknown() -> Self {
        Self {
            user: None,
            token: None,
            status: SessionStatus::Unknown,
        }
    }

    /// No credentials.
    pub fn anonymous() -> Self {
        Self {
            user: None,
            token: None,
            status: SessionStatus::Anonymous,
        }
    }

    /// Cached credentials exposed optimistically while the server confirms them.
    pub fn verifying(user: UserProfile, token: impl Into<String>) -> Result<Self> {
        let token = non_empty_token(token.into())?;
        Ok(Self {
            user: Some(user),
            token: Some(token),
            status: SessionStatus::Verifying,
        })
    }

    /// Signed-in session. Rejects an empty token.
    pub fn authenticated(user: UserProfile, token: impl Into<String>) -> Result<Self> {
        let token = non_empty_token(token.into())?;
        Ok(Self {
            user: Some(user),
            token: Some(token),
            status: SessionStatus::Authenticated,
        })
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }
}

fn non_empty_token(token: String) -> Result<String> {
    if token.trim().is_empty() {
        return Err(LeadgenError::invalid_input("Token must not be empty"));
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> UserProfile {
        UserProfile::fallback("admin")
    }

    #[test]
    fn test_authenticated_requires_user_and_token() {
        let session = Session::authenticated(admin(), "abc").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("abc"));
        assert_eq!(session.user().unwrap().username, "admin");
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(Session::authenticated(admin(), "").is_err());
        assert!(Session::authenticated(admin(), "   ").is_err());
        assert!(Session::verifying(admin(), "").is_err());
    }

    #[test]
    fn test_anonymous_and_unknown_hold_nothing() {
        for session in [Session::anonymous(), Session::unknown()] {
            assert!(!session.is_authenticated());
            assert!(session.user().is_none());
            assert!(session.token().is_none());
        }
    }

    #[test]
    fn test_only_terminal_states_are_resolved() {
        assert!(!SessionStatus::Unknown.is_resolved());
        assert!(!SessionStatus::Verifying.is_resolved());
        assert!(SessionStatus::Authenticated.is_resolved());
        assert!(SessionStatus::Anonymous.is_resolved());
    }

    #[test]
    fn test_transitions() {
        use SessionStatus::*;
        assert!(Unknown.can_transition_to(Verifying));
        assert!(Unknown.can_transition_to(Anonymous));
        assert!(Verifying.can_transition_to(Authenticated));
        assert!(Verifying.can_transition_to(Anonymous));
        assert!(Authenticated.can_transition_to(Anonymous));
        assert!(Anonymous.can_transition_to(Authenticated));
        assert!(!Authenticated.can_transition_to(Verifying));
        assert!(!Verifying.can_transition_to(Verifying));
        assert!(!Anonymous.can_transition_to(Unknown));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SessionStatus::Authenticated.to_string(), "authenticated");
        assert_eq!(SessionStatus::Verifying.as_ref(), "verifying");
    }
}
