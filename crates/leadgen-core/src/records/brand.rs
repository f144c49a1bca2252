use serde::{Deserialize, Serialize};

use crate::user::RecordId;

/// A researched brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: RecordId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Free-form map of network name to handle or URL.
    #[serde(default)]
    pub social_media: Option<serde_json::Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub validation_status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Brand {
    /// Social links flattened to `network: value` pairs for one-line display.
    pub fn social_summary(&self) -> Option<String> {
        let map = self.social_media.as_ref()?.as_object()?;
        if map.is_empty() {
            return None;
        }
        Some(
            map.iter()
                .map(|(k, v)| match v.as_str() {
                    Some(s) => format!("{}: {}", k, s),
                    None => format!("{}: {}", k, v),
                })
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_social_summary() {
        let brand: Brand = serde_json::from_str(
            r#"{"id":1,"name":"Nike","social_media":{"instagram":"@nike"}}"#,
        )
        .unwrap();
        assert_eq!(brand.social_summary().as_deref(), Some("instagram: @nike"));
    }

    #[test]
    fn test_social_summary_empty() {
        let brand: Brand =
            serde_json::from_str(r#"{"id":1,"social_media":{}}"#).unwrap();
        assert!(brand.social_summary().is_none());

        let brand: Brand = serde_json::from_str(r#"{"id":2}"#).unwrap();
        assert!(brand.social_summary().is_none());
    }
}
