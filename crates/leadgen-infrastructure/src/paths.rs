//! Unified path management for leadgen state files.
//!
//! ```text
//! ~/.config/leadgen/           # Config directory (platform specific)
//! ├── config.toml              # Client configuration
//! ├── credentials/             # Persisted session
//! │   ├── token
//! │   └── user.json
//! └── logs/                    # Application logs
//!     └── leadgen.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "leadgen";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path layout, optionally rooted somewhere other than the platform config dir.
#[derive(Debug, Clone)]
pub struct LeadgenPaths {
    root: Option<PathBuf>,
}

impl LeadgenPaths {
    /// Uses the platform config directory (`dirs::config_dir()/leadgen`).
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Uses `root` instead of the platform config directory (for testing).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Returns the leadgen configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => dirs::config_dir()
                .map(|d| d.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Directory holding the persisted token and user profile.
    pub fn credentials_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("credentials"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}

impl Default for LeadgenPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        // Platform dirs may be missing in minimal containers.
        if let Ok(config_dir) = LeadgenPaths::new().config_dir() {
            assert!(config_dir.ends_with("leadgen"));
        }
    }

    #[test]
    fn test_layout_under_root() {
        let paths = LeadgenPaths::with_root("/tmp/lg");
        assert_eq!(paths.config_dir().unwrap(), PathBuf::from("/tmp/lg"));
        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/lg/config.toml")
        );
        assert_eq!(
            paths.credentials_dir().unwrap(),
            PathBuf::from("/tmp/lg/credentials")
        );
        assert_eq!(paths.logs_dir().unwrap(), PathBuf::from("/tmp/lg/logs"));
    }
}
