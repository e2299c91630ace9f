//! Host-supplied configuration.
//!
//! The download manager hosting this client decides which integer codes it
//! understands, which user agent is sent, and how the network is used. When
//! nothing is supplied (standalone runs, tests) the defaults below apply.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::user_agent::default_user_agent;

/// Production API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://webshare.cz/api";
/// Per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
const MAX_TIMEOUT_SECS: u64 = 300;

/// Errors raised while loading or validating a [`HostConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("cannot read host config '{}': {source}\n  Suggestion: Check the path and file permissions", .path.display())]
    Read {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The config document is not valid JSON for this schema
    #[error("cannot parse host config: {reason}\n  Suggestion: Compare the file against the documented keys")]
    Parse {
        /// Parser failure description
        reason: String,
    },

    /// A value is outside its allowed range
    #[error("invalid host config value for `{field}`: {reason}")]
    Invalid {
        /// Offending key
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Integer codes the host expects back from `Verify` and `GetDownloadInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostCodes {
    /// Link is neither a file page nor a direct link.
    pub unsupported_link: i32,
    /// The API has no link for the identifier.
    pub file_not_found: i32,
    /// Salt or login failed.
    pub login_failed: i32,
    /// Account without VIP.
    pub user_free: i32,
    /// Account with VIP.
    pub user_premium: i32,
}

impl Default for HostCodes {
    fn default() -> Self {
        Self {
            unsupported_link: 116,
            file_not_found: 114,
            login_failed: 4,
            user_free: 5,
            user_premium: 6,
        }
    }
}

/// How the transport treats cookies set by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CookiePolicy {
    /// In-memory jar owned by one client instance.
    #[default]
    Isolated,
    /// No cookie store at all.
    Disabled,
}

/// Configuration injected into every client at construction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Result codes understood by the host.
    pub codes: HostCodes,
    /// User-Agent header for API requests.
    pub user_agent: String,
    /// API base URL; actions are appended as `<base>/<action>/`.
    pub api_base_url: String,
    /// Whole-request timeout in seconds (1..=300).
    pub timeout_secs: u64,
    /// Skip TLS certificate verification. Off unless a host explicitly needs it.
    pub accept_invalid_certs: bool,
    /// Cookie handling for the transport.
    pub cookies: CookiePolicy,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            codes: HostCodes::default(),
            user_agent: default_user_agent(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            accept_invalid_certs: false,
            cookies: CookiePolicy::default(),
        }
    }
}

impl HostConfig {
    /// Parses and validates a JSON document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for invalid JSON or unknown keys, and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// the errors of [`HostConfig::from_json_str`].
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Validates values against transport constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(ConfigError::Invalid {
                field: "timeout_secs",
                reason: format!(
                    "{} is out of range. Expected range: 1..={MAX_TIMEOUT_SECS}",
                    self.timeout_secs
                ),
            });
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "user_agent",
                reason: "must not be empty".to_string(),
            });
        }

        match Url::parse(&self.api_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            Ok(url) => Err(ConfigError::Invalid {
                field: "api_base_url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(error) => Err(ConfigError::Invalid {
                field: "api_base_url",
                reason: error.to_string(),
            }),
        }
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
