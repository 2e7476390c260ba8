//! Configuration management for agentograph.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `agentograph.toml` file
//! 3. User config `~/.config/agentograph/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source extraction configuration.
    pub extract: ExtractConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./agentograph.toml` (project local)
    /// 2. `~/.config/agentograph/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new("agentograph.toml").exists() {
            return Self::from_file("agentograph.toml");
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("agentograph").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(size) = std::env::var("AGENTOGRAPH_MAX_FILE_SIZE") {
            if let Ok(n) = size.parse() {
                self.extract.max_file_size = n;
            }
        }
        if let Ok(format) = std::env::var("AGENTOGRAPH_OUTPUT_FORMAT") {
            if let Ok(f) = format.parse() {
                self.output.format = f;
            }
        }
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Source extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Maximum size of a single source file to walk (in bytes).
    pub max_file_size: u64,

    /// Source file extensions to extract from (without leading dot).
    pub source_extensions: Vec<String>,

    /// Extension of analysis documents.
    pub document_extension: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            source_extensions: DEFAULT_SOURCE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            document_extension: DEFAULT_DOCUMENT_EXTENSION.to_string(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format for graph documents.
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: DEFAULT_PRETTY_JSON,
        }
    }
}

/// Graph document output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Turtle,
    Both,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "turtle" | "ttl" => Ok(Self::Turtle),
            "both" => Ok(Self::Both),
            other => Err(ConfigError::Invalid(format!(
                "unknown output format '{other}' (expected json, turtle or both)"
            ))),
        }
    }
}

impl OutputFormat {
    pub fn writes_json(&self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }

    pub fn writes_turtle(&self) -> bool {
        matches!(self, Self::Turtle | Self::Both)
    }
}
