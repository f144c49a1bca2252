//! File-backed credential storage.
//!
//! Persists the session as two entries in the credentials directory:
//!
//! ```text
//! <dir>/
//! ├── token          # bearer token, plain text
//! └── user.json      # serialized UserProfile
//! ```

use async_trait::async_trait;
use leadgen_core::session::{CredentialStore, StoredCredentials};
use leadgen_core::user::UserProfile;
use leadgen_core::{LeadgenError, Result};
use std::path::PathBuf;

use super::atomic_file::{AtomicFile, FileLock};

const TOKEN_FILE: &str = "token";
const USER_FILE: &str = "user.json";
const LOCK_NAME: &str = "credentials";

/// Durable [`CredentialStore`] backed by two files.
///
/// Both entries are written, read and erased under one exclusive lock so a
/// concurrent reader in another process never sees a mixed pair.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn token_file(&self) -> AtomicFile {
        AtomicFile::new(self.dir.join(TOKEN_FILE))
    }

    fn user_file(&self) -> AtomicFile {
        AtomicFile::new(self.dir.join(USER_FILE))
    }

    fn lock_target(&self) -> PathBuf {
        self.dir.join(LOCK_NAME)
    }

    fn load_blocking(&self) -> Result<Option<StoredCredentials>> {
        if !self.dir.exists() {
            return Ok(None);
        }
        let _lock = FileLock::acquire(&self.lock_target())?;

        let token = self.token_file().load()?;
        let user = self.user_file().load()?;

        let (Some(token), Some(user)) = (token, user) else {
            return Ok(None);
        };

        let user: UserProfile = serde_json::from_str(&user)?;
        Ok(Some(StoredCredentials::new(token.trim(), user)))
    }

    fn save_blocking(&self, credentials: &StoredCredentials) -> Result<()> {
        let user_json = serde_json::to_string(&credentials.user)?;
        let _lock = FileLock::acquire(&self.lock_target())?;

        self.user_file().save(&user_json)?;
        self.token_file().save(&credentials.token)?;
        Ok(())
    }

    fn clear_blocking(&self) -> Result<()> {
        if !self.dir.exists() {
            return Ok(());
        }
        let _lock = FileLock::acquire(&self.lock_target())?;

        // Token first: a token without a user is already treated as absent.
        let token_result = self.token_file().remove();
        let user_result = self.user_file().remove();
        token_result?;
        user_result?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<StoredCredentials>> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.load_blocking())
            .await
            .map_err(|e| LeadgenError::internal(format!("Credential load task failed: {}", e)))?
    }

    async fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        let store = self.clone();
        let credentials = credentials.clone();
        tokio::task::spawn_blocking(move || store.save_blocking(&credentials))
            .await
            .map_err(|e| LeadgenError::internal(format!("Credential save task failed: {}", e)))?
    }

    async fn clear(&self) -> Result<()> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.clear_blocking())
            .await
            .map_err(|e| LeadgenError::internal(format!("Credential clear task failed: {}", e)))?
    }
}
