//! Client configuration.
//!
//! Loaded from `~/.config/staffdeck/config.toml` when present, with
//! environment-variable overrides on top. A missing file yields defaults,
//! so a fresh checkout works against a local server with no setup.
//!
//! [`ClientConfig::load`] is the entry point for an embedding shell: call
//! it once at startup and hand the result to the application bootstrap.
//! Library consumers that manage their own configuration can construct
//! [`ClientConfig`] directly instead.

use serde::{Deserialize, Serialize};
use staffdeck_core::error::{Result, StaffdeckError};
use std::path::PathBuf;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "STAFFDECK_API_URL";
/// Environment variable overriding the durable storage directory.
pub const ENV_DATA_DIR: &str = "STAFFDECK_DATA_DIR";

/// Configuration for the client: where the server is and where the
/// durable cache lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the server API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Durable storage root; `None` means the platform data directory
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default config file path, then applies
    /// environment overrides.
    ///
    /// # Returns
    ///
    /// - `Ok(ClientConfig)`: parsed config, or defaults if the file does
    ///   not exist
    /// - `Err(_)`: the file exists but cannot be read or parsed
    pub fn load() -> Result<Self> {
        let mut config = match config_file_path() {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    StaffdeckError::config(format!(
                        "Failed to read config file at {path:?}: {e}"
                    ))
                })?;
                toml::from_str(&content).map_err(|e| {
                    StaffdeckError::config(format!(
                        "Failed to parse TOML from {path:?}: {e}"
                    ))
                })?
            }
            _ => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Applies `STAFFDECK_API_URL` and `STAFFDECK_DATA_DIR` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ENV_API_URL)
            && !url.trim().is_empty()
        {
            self.base_url = url;
        }
        if let Ok(dir) = std::env::var(ENV_DATA_DIR)
            && !dir.trim().is_empty()
        {
            self.data_dir = Some(PathBuf::from(dir));
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("staffdeck").join("config.toml"))
}
