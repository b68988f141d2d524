#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Protoweave Configuration
//!
//! This crate provides configuration management for `protoweavec`.
//! It handles loading, saving, and defaulting configuration files that specify:
//! - The output directory for generated `.proto` files
//! - Front-end evaluator binaries and library search paths
//! - The downstream `protoc` binary
//! - Logging configuration
//!
//! Configuration is stored in TOML format. Every section and key is optional;
//! command-line flags override whatever the file sets.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Configuration file was not found at the specified path
    #[error("Config file not found at: {0}")]
    NotFound(PathBuf),
    /// Could not locate the user's configuration directory
    #[error("Could not find user config directory")]
    ConfigDirUnavailable,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where generated files go
    pub output: OutputConfig,
    /// Front-end evaluator settings
    pub frontend: FrontendConfig,
    /// Downstream protocol compiler settings
    pub protoc: ProtocConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving generated `.proto` files, used when `--proto_out` is absent
    pub dir: Option<PathBuf>,
}

/// Front-end evaluator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Name or path of the nickel binary
    pub nickel_bin: String,
    /// Library search paths, lower priority than the ones given with `-J`
    pub jpaths: Vec<PathBuf>,
}

/// Protocol compiler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocConfig {
    /// Name or path of the protoc binary
    pub bin: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log file path (optional); stderr when unset
    pub file: Option<PathBuf>,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self { nickel_bin: "nickel".to_string(), jpaths: vec![] }
    }
}

impl Default for ProtocConfig {
    fn default() -> Self { Self { bin: "protoc".to_string() } }
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: "warn".to_string(), file: None } }
}

impl Config {
    /// Load configuration from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save this configuration as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Returns the default config file path:
    /// `{config_dir()}/protoweave/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir =
            dirs::config_dir().ok_or(ConfigError::ConfigDirUnavailable)?.join("protoweave");
        Ok(config_dir.join("config.toml"))
    }

    /// Load the configuration for a run.
    ///
    /// An explicit path must exist. Without one, the default path is used when a file
    /// is present there, and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) if path.is_file() => Self::from_file(path),
            Some(path) => Err(ConfigError::NotFound(path.to_path_buf())),
            None => Self::load_default_internal(Self::default_path().ok()),
        }
    }

    /// Internal function for testing - allows injection of the default path
    fn load_default_internal(default_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        match default_path {
            Some(path) if path.is_file() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }
}
