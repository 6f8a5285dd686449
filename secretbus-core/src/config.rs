use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::EncryptionType;
use crate::error::ConfigError;

/// Client configuration, usually read from
/// `$XDG_CONFIG_HOME/secretbus/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub bus: BusConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// `"plain"`, `"dh"`, or a full algorithm identifier.
    #[serde(default = "default_encryption")]
    pub encryption: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            encryption: default_encryption(),
        }
    }
}

impl SessionConfig {
    pub fn encryption(&self) -> Result<EncryptionType, ConfigError> {
        self.encryption.parse()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Platform window handle passed to `Prompt(window_id)` so the daemon can
    /// parent its dialog. Empty means "no parent".
    #[serde(default)]
    pub window_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusConfig {
    /// Explicit D-Bus address. When unset the standard session bus is used.
    #[serde(default)]
    pub address: Option<String>,
}

fn default_encryption() -> String {
    "dh".to_string()
}

impl Config {
    /// Read the config at `path`, falling back to defaults when it is absent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }
}

pub fn default_config_path() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("secretbus").join("config.toml")
}
