//! Process-local credential storage.

use async_trait::async_trait;
use leadgen_core::Result;
use leadgen_core::session::{CredentialStore, StoredCredentials};
use std::sync::{Arc, Mutex};

/// A [`CredentialStore`] that keeps the pair in memory.
///
/// Used for `--ephemeral` runs and as the storage double in tests.
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    slot: Arc<Mutex<Option<StoredCredentials>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the stored pair.
    pub fn snapshot(&self) -> Option<StoredCredentials> {
        self.slot.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn load(&self) -> Result<Option<StoredCredentials>> {
        Ok(self.snapshot())
    }

    async fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(credentials.clone());
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
        Ok(())
    }
}
