//! Configuration service implementation.
//!
//! Loads `ClientConfig` from config.toml, layers environment overrides on
//! top, and caches the result.

use crate::paths::LeadgenPaths;
use crate::storage::ConfigStorage;
use leadgen_core::config::ClientConfig;
use leadgen_core::{LeadgenError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the client configuration.
///
/// A missing or unreadable file yields defaults; an unreadable file is
/// logged since it usually means a typo the user wants to hear about.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Uses the default config file location.
    pub fn new() -> Self {
        Self {
            path: LeadgenPaths::new().config_file().ok(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Uses an explicit config file.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the effective configuration, loading from file if not cached.
    pub fn get_config(&self) -> ClientConfig {
        // Check if already cached
        if let Ok(read_lock) = self.config.read()
            && let Some(ref cached) = *read_lock
        {
            return cached.clone();
        }

        let loaded = self.load_file().with_env();

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    /// The config file this service reads, if one could be located.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Writes the commented default template if no config file exists yet.
    ///
    /// Returns `true` when a file was created.
    pub fn ensure_file(&self) -> Result<bool> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| LeadgenError::config("Cannot find config directory"))?;
        let created = ConfigStorage::new(path).ensure_exists()?;
        if created {
            self.invalidate_cache();
        }
        Ok(created)
    }

    /// Applies `change` to the file contents (without environment overrides)
    /// and writes the result back.
    pub fn update(&self, change: impl FnOnce(&mut ClientConfig)) -> Result<ClientConfig> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| LeadgenError::config("Cannot find config directory"))?;
        let storage = ConfigStorage::new(path);
        let mut config = storage.load()?.unwrap_or_default();
        change(&mut config);
        storage.save(&config)?;
        self.invalidate_cache();
        Ok(config)
    }

    fn load_file(&self) -> ClientConfig {
        let Some(path) = &self.path else {
            tracing::debug!("No config directory available, using defaults");
            return ClientConfig::default();
        };

        match ConfigStorage::new(path.clone()).load() {
            Ok(Some(config)) => config,
            Ok(None) => ClientConfig::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable config file");
                ClientConfig::default()
            }
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        let config = service.get_config();
        assert_eq!(config.api.timeout_secs, None);
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "environment = [").unwrap();

        let config = ConfigService::with_path(path).get_config();
        assert_eq!(config.session, Default::default());
    }

    #[test]
    fn test_cache_and_invalidate() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[api]\ntimeout_secs = 5\n").unwrap();

        let service = ConfigService::with_path(path.clone());
        assert_eq!(service.get_config().api.timeout_secs, Some(5));

        fs::write(&path, "environment = \"production\"\n[api]\ntimeout_secs = 7\n").unwrap();
        assert_eq!(service.get_config().api.timeout_secs, Some(5));

        service.invalidate_cache();
        let reloaded = service.get_config();
        assert_eq!(reloaded.api.timeout_secs, Some(7));
    }

    #[test]
    fn test_ensure_file_creates_template_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("leadgen").join("config.toml");
        let service = ConfigService::with_path(path.clone());

        assert!(service.ensure_file().unwrap());
        assert!(path.exists());
        assert!(!service.ensure_file().unwrap());
        assert_eq!(service.path(), Some(path.as_path()));
    }

    #[test]
    fn test_update_writes_file_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::with_path(path.clone());
        assert_eq!(service.get_config().api.timeout_secs, None);

        let saved = service
            .update(|c| c.api.timeout_secs = Some(12))
            .unwrap();

        assert_eq!(saved.api.timeout_secs, Some(12));
        assert!(fs::read_to_string(&path).unwrap().contains("timeout_secs = 12"));
        assert_eq!(service.get_config().api.timeout_secs, Some(12));
    }
}
