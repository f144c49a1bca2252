//! UserProfile domain model.

use serde::{Deserialize, Serialize};

use super::RecordId;

/// Profile of the signed-in user as returned by `/api/auth/me` and login.
///
/// Immutable once received; the session store replaces it wholesale on each
/// login or successful verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Server id. Absent for the fallback profile built at login when the
    /// server omits the user object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl UserProfile {
    /// Minimal profile used when the login response carries a token but no user.
    pub fn fallback(username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            id: None,
            email: username.clone(),
            username,
            full_name: None,
            role: None,
            is_active: None,
            created_at: None,
        }
    }

    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_user() {
        let user: UserProfile = serde_json::from_str(r#"{"username":"admin"}"#).unwrap();
        assert_eq!(user.username, "admin");
        assert!(user.id.is_none());
        assert_eq!(user.email, "");
    }

    #[test]
    fn test_deserialize_full_user() {
        let user: UserProfile = serde_json::from_str(
            r#"{"id":1,"username":"admin","email":"admin@example.com","full_name":"Admin User","role":"admin","is_active":true}"#,
        )
        .unwrap();
        assert_eq!(user.id, Some(RecordId::Number(1)));
        assert_eq!(user.display_name(), "Admin User");
        assert_eq!(user.role.as_deref(), Some("admin"));
    }

    #[test]
    fn test_fallback_uses_username_as_email() {
        let user = UserProfile::fallback("jane");
        assert_eq!(user.email, "jane");
        assert_eq!(user.display_name(), "jane");
    }
}
