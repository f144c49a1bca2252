//! Client configuration model.
//!
//! Loaded from `config.toml` by `leadgen-infrastructure`; environment
//! variables and CLI flags are layered on top by [`ClientConfig::with_env`]
//! and the binary.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::{Display, EnumString};

/// Address used when no base URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Per-request latency bound.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable selecting the API base address.
pub const ENV_API_URL: &str = "LEADGEN_API_URL";

/// Environment variable selecting the runtime environment.
pub const ENV_ENVIRONMENT: &str = "LEADGEN_ENV";

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// What the session store does when background verification fails.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VerifyFailurePolicy {
    /// Any failure clears the persisted credentials.
    #[default]
    Purge,
    /// Network failures leave the persisted credentials for the next start;
    /// the session still ends anonymous. Rejections purge as usual.
    RetainOnNetworkError,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ApiSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct SessionSettings {
    #[serde(default)]
    pub verify_failure: VerifyFailurePolicy,
}

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub session: SessionSettings,
}

impl ClientConfig {
    /// Applies `LEADGEN_API_URL` and `LEADGEN_ENV` on top of the file values.
    ///
    /// An unparseable `LEADGEN_ENV` is ignored.
    pub fn with_env(self) -> Self {
        self.with_overrides(
            std::env::var(ENV_API_URL).ok(),
            std::env::var(ENV_ENVIRONMENT).ok(),
        )
    }

    /// Same as [`with_env`](Self::with_env) with explicit values.
    pub fn with_overrides(mut self, api_url: Option<String>, environment: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = Some(url);
        }
        if let Some(env) = environment.and_then(|e| e.trim().parse().ok()) {
            self.environment = env;
        }
        self
    }

    /// The configured base URL without a trailing slash, or the local default.
    pub fn base_url(&self) -> String {
        self.api
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// Whether no base URL was configured and the local default applies.
    pub fn uses_default_base_url(&self) -> bool {
        self.api
            .base_url
            .as_deref()
            .map(|u| u.trim().is_empty())
            .unwrap_or(true)
    }

    /// Whether the effective base URL points at a local development server
    /// while running outside development.
    pub fn local_address_outside_development(&self) -> bool {
        if self.environment == Environment::Development {
            return false;
        }
        let url = self.base_url();
        url.contains("localhost") || url.contains("127.0.0.1")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.api
                .timeout_secs
                .filter(|s| *s > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }
}
