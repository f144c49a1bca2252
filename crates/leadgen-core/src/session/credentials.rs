//! Durable credential storage contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::user::UserProfile;

/// The two persisted entries: bearer token and serialized user profile.
///
/// They are always written together and erased together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub token: String,
    pub user: UserProfile,
}

impl StoredCredentials {
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}

/// Storage backend for the persisted session.
///
/// Implementations must treat a half-present pair (token without user or
/// vice versa) as no session at all.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Reads both entries.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(_))`: both entries present and parseable
    /// - `Ok(None)`: either entry absent or empty
    /// - `Err(_)`: read failure or corrupt user JSON
    async fn load(&self) -> Result<Option<StoredCredentials>>;

    /// Writes both entries. Returns only after the write is durable.
    async fn save(&self, credentials: &StoredCredentials) -> Result<()>;

    /// Erases both entries. Erasing an absent entry is not an error.
    async fn clear(&self) -> Result<()>;
}
