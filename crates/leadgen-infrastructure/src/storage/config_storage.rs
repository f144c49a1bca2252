//! Config file storage.
//!
//! Reads and writes `config.toml` as a typed [`ClientConfig`].

use leadgen_core::Result;
use leadgen_core::config::ClientConfig;
use std::path::{Path, PathBuf};

use super::atomic_file::AtomicFile;

/// Template written by [`ConfigStorage::ensure_exists`].
const CONFIG_TEMPLATE: &str = r#"# Lead Generation client configuration
#
# environment = "production"

[api]
# base_url = "https://api.example.com"
# timeout_secs = 30

[session]
# "purge" clears saved credentials on any verification failure.
# "retain_on_network_error" keeps them when the server was unreachable.
verify_failure = "purge"
"#;

/// Storage for the client configuration file.
///
/// Responsibilities:
/// - Load config.toml into a `ClientConfig`
/// - Write a commented template on request
///
/// Does NOT:
/// - Apply environment overrides (see `ConfigService`)
/// - Cache anything
pub struct ConfigStorage {
    file: AtomicFile,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Loads the configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ClientConfig))`: file parsed
    /// - `Ok(None)`: file missing or empty
    /// - `Err`: file unreadable or not valid TOML
    pub fn load(&self) -> Result<Option<ClientConfig>> {
        let Some(content) = self.file.load()? else {
            return Ok(None);
        };
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Saves `config` atomically.
    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        let content = toml::to_string_pretty(config)?;
        self.file.save(&content)?;
        Ok(())
    }

    /// Writes the commented template if no config file exists yet.
    ///
    /// Returns `true` when the template was written.
    pub fn ensure_exists(&self) -> Result<bool> {
        if self.file.path().exists() {
            return Ok(false);
        }
        self.file.save(CONFIG_TEMPLATE)?;
        Ok(true)
    }
}
