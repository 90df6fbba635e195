//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/campusnavi/config.toml` by default:
//!
//! ```toml
//! debug = false
//!
//! [export]
//! url = "https://ys.learnus.org/calendar/export_execute.php"
//! preset_what = "all"
//! preset_time = "recentupcoming"
//! timeout = 30
//!
//! [storage]
//! credential_path = "/home/me/.local/share/campusnavi/credential.json"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use campusnavi_providers::learnus::LearnUsConfig;

/// Configuration for the campusnavi client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Calendar export endpoint settings.
    pub export: ExportSettings,

    /// Credential storage settings.
    pub storage: StorageSettings,
}

/// Calendar export endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Export endpoint, without query parameters.
    pub url: String,

    /// `preset_what` query value.
    pub preset_what: String,

    /// `preset_time` query value.
    pub preset_time: String,

    /// Request timeout in seconds.
    pub timeout: u64,

    /// User agent override.
    pub user_agent: Option<String>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            url: LearnUsConfig::DEFAULT_EXPORT_URL.to_string(),
            preset_what: LearnUsConfig::DEFAULT_PRESET_WHAT.to_string(),
            preset_time: LearnUsConfig::DEFAULT_PRESET_TIME.to_string(),
            timeout: LearnUsConfig::DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ExportSettings {
    /// Converts to the export client configuration.
    pub fn to_learnus_config(&self) -> Result<LearnUsConfig, String> {
        if self.timeout == 0 {
            return Err("export timeout must be greater than zero".to_string());
        }

        let mut config = LearnUsConfig::new(&self.url)
            .map_err(|e| format!("invalid export url `{}`: {}", self.url, e))?
            .with_presets(&self.preset_what, &self.preset_time)
            .with_timeout(Duration::from_secs(self.timeout));

        if let Some(ref agent) = self.user_agent {
            config = config.with_user_agent(agent);
        }

        Ok(config)
    }
}

/// Credential storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Where the linked credential is stored.
    pub credential_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the credential file path, falling back to the data directory.
    pub fn credential_path(&self) -> PathBuf {
        self.storage
            .credential_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join("credential.json"))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("campusnavi")
    }

    /// Returns the default data directory path.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("campusnavi")
    }
}
