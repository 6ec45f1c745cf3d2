//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load TOML configuration files
//! across all LGCS applications.
//!
//! # Usage
//!
//! ```rust,no_run
//! use lgcs_common::config::{ConfigError, ConfigLoader, LgcsConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = LgcsConfig::load(Path::new("config/lgcs.toml"))?;
//!     config.validate()?;
//!     println!("Service: {}", config.shared.service_name);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::consts::DEFAULT_LOG_FILE;
use crate::gear::config::GearConfig;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Common configuration fields shared across all LGCS applications.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "lgcs-01"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier, shown in startup logs.
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

fn default_service_name() -> String {
    "lgcs".to_string()
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            service_name: default_service_name(),
        }
    }
}

/// Rendering of the event log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventFormat {
    /// `[HH:MM:SS] [STATE] message` lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Event log sink configuration (`[log]` table).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Event log file, truncated at startup.
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// File line format.
    #[serde(default)]
    pub format: EventFormat,

    /// Echo events to stdout.
    #[serde(default = "default_true")]
    pub console: bool,
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

fn default_true() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            format: EventFormat::default(),
            console: true,
        }
    }
}

impl LogConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "log.file cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Top-level LGCS configuration file.
///
/// Every table is optional; missing tables take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LgcsConfig {
    /// Shared application settings.
    #[serde(default)]
    pub shared: SharedConfig,

    /// Gear timing, initial position and fault policy.
    #[serde(default)]
    pub gear: GearConfig,

    /// Event log sink.
    #[serde(default)]
    pub log: LogConfig,
}

impl LgcsConfig {
    /// Validate all tables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.gear
            .validate()
            .map_err(ConfigError::ValidationError)?;
        self.log.validate()
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
