//! Wire schemas for each endpoint.
//!
//! Every response is parsed into one of these shapes at the adapter
//! boundary; call sites only ever see domain types or a `LeadgenError`.

use leadgen_core::api::{ActionAck, LoginGrant};
use leadgen_core::user::UserProfile;
use leadgen_core::{LeadgenError, Result};
use serde::{Deserialize, Serialize};

/// Body of a failed response: `{ "success": false, "message": "...", "error": "..." }`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    /// Extracts the human-readable message from an error body, if any.
    pub(crate) fn message_from(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        parsed
            .message
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty())
    }
}

/// `{ "success": bool, "data": T, "message": "..." }`
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Returns `data`, rejecting explicit `success: false` and missing data.
    pub(crate) fn into_data(self, endpoint: &str) -> Result<T> {
        if self.success == Some(false) {
            return Err(LeadgenError::Validation {
                status: 200,
                message: self.message,
            });
        }
        self.data
            .ok_or_else(|| LeadgenError::malformed(endpoint, "missing `data`"))
    }

    /// Like [`into_data`](Self::into_data) but also requires `success: true`.
    pub(crate) fn into_confirmed_data(self, endpoint: &str) -> Result<T> {
        if self.success != Some(true) {
            return Err(LeadgenError::malformed(endpoint, "missing success flag"));
        }
        self.into_data(endpoint)
    }
}

impl<T> Envelope<Vec<T>> {
    /// List payload; a missing `data` field is an empty list.
    pub(crate) fn into_list(self) -> Result<Vec<T>> {
        if self.success == Some(false) {
            return Err(LeadgenError::Validation {
                status: 200,
                message: self.message,
            });
        }
        Ok(self.data.unwrap_or_default())
    }
}

/// `{ "success": bool, "message": "..." }` for actions whose payload the
/// client does not use.
#[derive(Debug, Deserialize)]
pub(crate) struct AckBody {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AckBody {
    pub(crate) fn into_ack(self) -> Result<ActionAck> {
        if self.success == Some(false) {
            return Err(LeadgenError::Validation {
                status: 200,
                message: self.message,
            });
        }
        Ok(ActionAck {
            message: self.message,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// `POST /api/auth/login` → `{ success, token, user, message }`
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    pub(crate) fn into_grant(self) -> Result<LoginGrant> {
        if !self.success {
            return Err(LeadgenError::Validation {
                status: 200,
                message: Some(self.message.unwrap_or_else(|| "Login failed".to_string())),
            });
        }
        Ok(LoginGrant {
            token: self.token.filter(|t| !t.trim().is_empty()),
            user: self.user,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ScrapeRequest<'a> {
    pub url: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResearchRequest<'a> {
    pub brand_name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnalyzeRequest<'a> {
    pub brand_id: &'a leadgen_core::user::RecordId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadgen_core::records::Seller;

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            ErrorBody::message_from(r#"{"success":false,"message":"Brand ID is required"}"#)
                .as_deref(),
            Some("Brand ID is required")
        );
        assert_eq!(
            ErrorBody::message_from(r#"{"error":"Token is missing"}"#).as_deref(),
            Some("Token is missing")
        );
        assert!(ErrorBody::message_from("<html>502</html>").is_none());
        assert!(ErrorBody::message_from(r#"{"message":""}"#).is_none());
    }

    #[test]
    fn test_list_without_data_is_empty() {
        let envelope: Envelope<Vec<Seller>> =
            serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(envelope.into_list().unwrap().is_empty());
    }

    #[test]
    fn test_list_failure_flag() {
        let envelope: Envelope<Vec<Seller>> =
            serde_json::from_str(r#"{"success":false,"message":"nope"}"#).unwrap();
        assert!(matches!(
            envelope.into_list(),
            Err(LeadgenError::Validation { .. })
        ));
    }

    #[test]
    fn test_confirmed_data_requires_flag() {
        let envelope: Envelope<UserProfile> =
            serde_json::from_str(r#"{"data":{"username":"admin"}}"#).unwrap();
        assert!(matches!(
            envelope.into_confirmed_data("/api/auth/me"),
            Err(LeadgenError::MalformedResponse { .. })
        ));

        let envelope: Envelope<UserProfile> =
            serde_json::from_str(r#"{"success":true,"data":{"username":"admin"}}"#).unwrap();
        assert_eq!(
            envelope.into_confirmed_data("/api/auth/me").unwrap().username,
            "admin"
        );
    }

    #[test]
    fn test_login_grant() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"success":true,"token":"abc","user":{"username":"admin"}}"#,
        )
        .unwrap();
        let grant = response.into_grant().unwrap();
        assert_eq!(grant.token.as_deref(), Some("abc"));
        assert_eq!(grant.user.unwrap().username, "admin");

        let response: LoginResponse =
            serde_json::from_str(r#"{"success":true,"token":""}"#).unwrap();
        assert!(response.into_grant().unwrap().token.is_none());

        let response: LoginResponse =
            serde_json::from_str(r#"{"success":false,"message":"Invalid credentials"}"#)
                .unwrap();
        let err = response.into_grant().unwrap_err();
        assert_eq!(
            err.banner_text("Login failed").as_deref(),
            Some("Invalid credentials")
        );
    }
}
