//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/giftwrap/config.toml)
//! 3. Environment variables (GIFTWRAP_* prefix)
//!
//! Environment variables take precedence over config file values.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::codec::ImportOptions;

/// Environment variable prefix
const ENV_PREFIX: &str = "GIFTWRAP";

/// Default timeout for AI generation requests
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;

/// Default generation endpoint (Gemini `generateContent`)
pub const DEFAULT_AI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default generation model
pub const DEFAULT_AI_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the saved document
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Write logs here instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// API key for AI content generation
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// Base URL of the generation API
    #[serde(default = "default_ai_endpoint")]
    pub ai_endpoint: String,

    /// Model name appended to the endpoint
    #[serde(default = "default_ai_model")]
    pub ai_model: String,

    /// Seconds before a generation request is abandoned
    #[serde(default = "default_ai_timeout_secs")]
    pub ai_timeout_secs: u64,

    /// Keep blocks of unknown type when importing instead of rejecting the file
    #[serde(default)]
    pub import_unknown_blocks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_file: None,
            ai_api_key: None,
            ai_endpoint: default_ai_endpoint(),
            ai_model: default_ai_model(),
            ai_timeout_secs: default_ai_timeout_secs(),
            import_unknown_blocks: false,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_path(p),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        if let Ok(val) = std::env::var(format!("{}_AI_API_KEY", ENV_PREFIX)) {
            self.ai_api_key = if val.is_empty() { None } else { Some(val) };
        }

        if let Ok(val) = std::env::var(format!("{}_AI_ENDPOINT", ENV_PREFIX)) {
            self.ai_endpoint = val;
        }

        if let Ok(val) = std::env::var(format!("{}_AI_MODEL", ENV_PREFIX)) {
            self.ai_model = val;
        }

        if let Ok(val) = std::env::var(format!("{}_AI_TIMEOUT_SECS", ENV_PREFIX)) {
            match val.parse() {
                Ok(secs) => self.ai_timeout_secs = secs,
                Err(_) => {
                    tracing::warn!("Ignoring invalid {}_AI_TIMEOUT_SECS={:?}", ENV_PREFIX, val)
                }
            }
        }

        if let Ok(val) = std::env::var(format!("{}_IMPORT_UNKNOWN_BLOCKS", ENV_PREFIX)) {
            self.import_unknown_blocks = val.eq_ignore_ascii_case("true") || val == "1";
        }
    }

    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to the default config file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with GIFTWRAP_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("giftwrap")
            .join("config.toml")
    }

    /// How imports treat unknown block types
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            allow_unknown_types: self.import_unknown_blocks,
        }
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("giftwrap")
}

fn default_ai_endpoint() -> String {
    DEFAULT_AI_ENDPOINT.to_string()
}

fn default_ai_model() -> String {
    DEFAULT_AI_MODEL.to_string()
}

fn default_ai_timeout_secs() -> u64 {
    DEFAULT_AI_TIMEOUT_SECS
}
