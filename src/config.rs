//! # Configuration Management
//!
//! Centralized configuration for the credential element codec.
//!
//! Decoding limits and logging output are grouped into a single
//! [`CodecConfig`] that can be deserialized from TOML, overridden from the
//! environment, or built directly from defaults.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()` / `from_toml()`
//! - Direct instantiation with defaults
//! - Environment overrides via `from_env()`

use crate::error::{CodecError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::Level;

/// Width in bytes of every length prefix on the wire.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Smallest possible encoded element: empty key and empty value.
pub const MIN_ELEMENT_SIZE: usize = 2 * LENGTH_PREFIX_SIZE;

/// Default cap on a decoded key, in bytes
pub const DEFAULT_MAX_KEY_LEN: usize = 1024;

/// Default cap on a decoded value, in bytes (1 MiB)
pub const DEFAULT_MAX_VALUE_LEN: usize = 1024 * 1024;

/// Default cap on the number of elements in a decoded list
pub const DEFAULT_MAX_ELEMENTS: usize = 1024;

/// Hard ceiling imposed by the u32 length prefix.
pub const MAX_WIRE_LEN: usize = u32::MAX as usize;

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CodecConfig {
    /// Decoding limits
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CodecConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| CodecError::ConfigError(format!("Failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| CodecError::ConfigError(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| CodecError::ConfigError(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Override fields from `CREDENTIAL_ELEMENT_*` environment variables.
    ///
    /// A variable that is set but cannot be parsed is a configuration error.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(val) = env_usize("CREDENTIAL_ELEMENT_MAX_KEY_LEN")? {
            self.limits.max_key_len = val;
        }
        if let Some(val) = env_usize("CREDENTIAL_ELEMENT_MAX_VALUE_LEN")? {
            self.limits.max_value_len = val;
        }
        if let Some(val) = env_usize("CREDENTIAL_ELEMENT_MAX_ELEMENTS")? {
            self.limits.max_elements = val;
        }
        if let Ok(level) = std::env::var("CREDENTIAL_ELEMENT_LOG_LEVEL") {
            self.logging.log_level = level.parse::<Level>().map_err(|_| {
                CodecError::ConfigError(format!("Invalid log level in environment: {level}"))
            })?;
        }
        Ok(())
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CodecError::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| CodecError::ConfigError(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.limits.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CodecError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

fn env_usize(name: &str) -> Result<Option<usize>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse::<usize>()
            .map(Some)
            .map_err(|e| CodecError::ConfigError(format!("Invalid value for {name}: {e}"))),
        Err(_) => Ok(None),
    }
}

/// Upper bounds on element fields, applied while decoding untrusted input
/// and by the stream codec on encode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Maximum key length in bytes
    pub max_key_len: usize,

    /// Maximum value length in bytes
    pub max_value_len: usize,

    /// Maximum number of elements in a list
    pub max_elements: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_key_len: DEFAULT_MAX_KEY_LEN,
            max_value_len: DEFAULT_MAX_VALUE_LEN,
            max_elements: DEFAULT_MAX_ELEMENTS,
        }
    }
}

impl LimitsConfig {
    /// Limits that only enforce what the wire format itself can express.
    pub const fn unbounded() -> Self {
        Self {
            max_key_len: MAX_WIRE_LEN,
            max_value_len: MAX_WIRE_LEN,
            max_elements: MAX_WIRE_LEN,
        }
    }

    /// Largest single element these limits admit, prefixes included.
    pub fn max_element_size(&self) -> usize {
        MIN_ELEMENT_SIZE
            .saturating_add(self.max_key_len)
            .saturating_add(self.max_value_len)
    }

    /// Validate limits configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_key_len == 0 {
            errors.push("Max key length must be greater than 0".to_string());
        } else if self.max_key_len > MAX_WIRE_LEN {
            errors.push(format!(
                "Max key length too large: {} (wire maximum: {})",
                self.max_key_len, MAX_WIRE_LEN
            ));
        }

        if self.max_value_len > MAX_WIRE_LEN {
            errors.push(format!(
                "Max value length too large: {} (wire maximum: {})",
                self.max_value_len, MAX_WIRE_LEN
            ));
        }

        if self.max_elements == 0 {
            errors.push("Max elements must be greater than 0".to_string());
        } else if self.max_elements > MAX_WIRE_LEN {
            errors.push(format!(
                "Max elements too large: {} (wire maximum: {})",
                self.max_elements, MAX_WIRE_LEN
            ));
        }

        errors
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,

    /// Include span and event targets in output
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("credential-element"),
            log_level: Level::INFO,
            json_format: false,
            with_target: true,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        errors
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
