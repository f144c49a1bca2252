//! Error types for the Lead Generation client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire client.
///
/// The first four variants form the transport taxonomy every view reacts to;
/// the remaining ones cover local storage, configuration and parsing.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LeadgenError {
    /// The server could not be reached (connection refused, DNS, timeout).
    #[error("Network unreachable: {message}")]
    NetworkUnreachable { message: String },

    /// The server rejected the credentials (HTTP 401).
    #[error("Unauthorized{}", .message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Unauthorized { message: Option<String> },

    /// A 4xx response other than 401, or a locally rejected input.
    #[error("Validation error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Validation {
        status: u16,
        message: Option<String>,
    },

    /// A 5xx response.
    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    /// A successful response whose body did not match the expected schema.
    #[error("Malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    /// Durable storage error (credential files)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LeadgenError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NetworkUnreachable error
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkUnreachable {
            message: message.into(),
        }
    }

    /// Creates a locally raised validation error (status 400).
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::Validation {
            status: 400,
            message: Some(message.into()),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates a MalformedResponse error
    pub fn malformed(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Maps an HTTP error status and optional server message onto the taxonomy.
    ///
    /// Returns `None` for statuses that are not errors.
    pub fn from_status(status: u16, message: Option<String>) -> Option<Self> {
        match status {
            401 => Some(Self::Unauthorized { message }),
            400..=499 => Some(Self::Validation { status, message }),
            500..=599 => Some(Self::Server { status, message }),
            _ => None,
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an Unauthorized error
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Check if this is a network error (timeouts included)
    pub fn is_network(&self) -> bool {
        matches!(self, Self::NetworkUnreachable { .. })
    }

    /// Check if this is a storage or serialization error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Serialization { .. })
    }

    /// Text for an inline error banner.
    ///
    /// Uses the server-provided message when there is one and `fallback`
    /// otherwise. Returns `None` for `Unauthorized`, which is handled
    /// globally and never shown as a form error.
    pub fn banner_text(&self, fallback: &str) -> Option<String> {
        match self {
            Self::Unauthorized { .. } => None,
            Self::Validation { message, .. } | Self::Server { message, .. } => Some(
                message
                    .as_deref()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or(fallback)
                    .to_string(),
            ),
            _ => Some(fallback.to_string()),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for LeadgenError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for LeadgenError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LeadgenError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for LeadgenError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for LeadgenError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, LeadgenError>`.
pub type Result<T> = std::result::Result<T, LeadgenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_taxonomy() {
        assert_eq!(
            LeadgenError::from_status(401, None),
            Some(LeadgenError::Unauthorized { message: None })
        );
        assert!(matches!(
            LeadgenError::from_status(422, Some("bad".into())),
            Some(LeadgenError::Validation { status: 422, .. })
        ));
        assert!(matches!(
            LeadgenError::from_status(503, None),
            Some(LeadgenError::Server { status: 503, .. })
        ));
        assert_eq!(LeadgenError::from_status(200, None), None);
        assert_eq!(LeadgenError::from_status(302, None), None);
    }

    #[test]
    fn test_banner_text_prefers_server_message() {
        let err = LeadgenError::Validation {
            status: 400,
            message: Some("Invalid Amazon seller URL".into()),
        };
        assert_eq!(
            err.banner_text("Failed to scrape seller").as_deref(),
            Some("Invalid Amazon seller URL")
        );
    }

    #[test]
    fn test_banner_text_falls_back() {
        let err = LeadgenError::Server {
            status: 500,
            message: Some("   ".into()),
        };
        assert_eq!(
            err.banner_text("Failed to scrape seller").as_deref(),
            Some("Failed to scrape seller")
        );
        assert_eq!(
            LeadgenError::network("refused")
                .banner_text("Failed to fetch brands")
                .as_deref(),
            Some("Failed to fetch brands")
        );
    }

    #[test]
    fn test_unauthorized_has_no_banner() {
        let err = LeadgenError::Unauthorized {
            message: Some("Token expired".into()),
        };
        assert!(err.is_unauthorized());
        assert!(err.banner_text("x").is_none());
    }

    #[test]
    fn test_io_error_is_storage() {
        let err: LeadgenError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.is_storage());
    }
}
