//! Runtime settings for the `rgmp-scan` tool
//!
//! Read from the environment:
//! - `RGMP_FORMAT`: `json` (default), `pretty` or `tree`
//! - `RGMP_MAX_MESSAGE_SIZE`: largest accepted body size, default 2048

use rgmp_codec::{ScanConfig, MAX_MESSAGE_SIZE};
use thiserror::Error;

use crate::render::OutputFormat;

pub const FORMAT_VAR: &str = "RGMP_FORMAT";
pub const MAX_MESSAGE_SIZE_VAR: &str = "RGMP_MAX_MESSAGE_SIZE";

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid RGMP_FORMAT value: {0:?} (expected json, pretty or tree)")]
    InvalidFormat(String),

    #[error("Invalid RGMP_MAX_MESSAGE_SIZE value: {0:?} (expected a positive integer)")]
    InvalidMaxMessageSize(String),
}

/// Tool configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    format: OutputFormat,
    max_message_size: usize,
}

impl Config {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self {
            format: OutputFormat::default(),
            max_message_size: MAX_MESSAGE_SIZE,
        }
    }

    /// Build from a key lookup
    ///
    /// # Arguments
    /// * `lookup` - Returns the value of a setting, or `None` if unset
    ///
    /// Unset keys keep their defaults; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(value) = get(FORMAT_VAR) {
            config.format = value.parse()?;
        }

        if let Some(value) = get(MAX_MESSAGE_SIZE_VAR) {
            config.max_message_size = match value.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => return Err(ConfigError::InvalidMaxMessageSize(value)),
            };
        }

        Ok(config)
    }

    /// Build from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn max_message_size(&self) -> usize {
        self.max_message_size
    }

    /// Decoder settings derived from this configuration
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig::new().with_max_message_size(self.max_message_size)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
