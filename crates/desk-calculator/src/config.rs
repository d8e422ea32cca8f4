//! Engine configuration
//!
//! Every field has a default matching the classic desk calculator, so an
//! empty JSON object (`{}`) is a complete configuration:
//!
//! ```json
//! {
//!   "max_entry_len": 12,
//!   "history_capacity": 5,
//!   "error_recovery_ms": 1000,
//!   "result_precision": 8,
//!   "thousands_separator": ","
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating an [`EngineConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid JSON for this schema
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range
    #[error("Invalid config value for {field}: {message}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },
}

/// Calculator engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Digits beyond this entry length are dropped
    pub max_entry_len: usize,
    /// Completed calculations kept in history
    pub history_capacity: usize,
    /// How long "Error" stays on the display before auto-recovery
    pub error_recovery_ms: u64,
    /// Decimal places results are rounded to
    pub result_precision: u32,
    /// Separator placed between thousands groups in the primary display
    pub thousands_separator: char,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_entry_len: 12,
            history_capacity: 5,
            error_recovery_ms: 1000,
            result_precision: 8,
            thousands_separator: crate::format::DEFAULT_SEPARATOR,
        }
    }
}

impl EngineConfig {
    /// Highest precision that still leaves room in an f64 mantissa
    pub const MAX_PRECISION: u32 = 15;

    /// Create a config with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }

    /// Serializes the config to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entry_len == 0 {
            return Err(ConfigError::Invalid {
                field: "max_entry_len",
                message: "must be at least 1".into(),
            });
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "history_capacity",
                message: "must be at least 1".into(),
            });
        }
        if self.result_precision > Self::MAX_PRECISION {
            return Err(ConfigError::Invalid {
                field: "result_precision",
                message: format!("must be at most {}", Self::MAX_PRECISION),
            });
        }
        let sep = self.thousands_separator;
        if sep.is_ascii_digit() || matches!(sep, '.' | '-' | '+' | '*' | '/') {
            return Err(ConfigError::Invalid {
                field: "thousands_separator",
                message: format!("'{sep}' would be ambiguous in a number"),
            });
        }
        Ok(())
    }

    /// Returns the error recovery delay
    #[must_use]
    pub const fn error_recovery_delay(&self) -> Duration {
        Duration::from_millis(self.error_recovery_ms)
    }

    /// Set the maximum entry length
    #[must_use]
    pub const fn with_max_entry_len(mut self, len: usize) -> Self {
        self.max_entry_len = len;
        self
    }

    /// Set the history capacity
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set the error recovery delay in milliseconds
    #[must_use]
    pub const fn with_error_recovery_ms(mut self, ms: u64) -> Self {
        self.error_recovery_ms = ms;
        self
    }

    /// Set the result precision in decimal places
    #[must_use]
    pub const fn with_result_precision(mut self, precision: u32) -> Self {
        self.result_precision = precision;
        self
    }

    /// Set the thousands separator
    #[must_use]
    pub const fn with_thousands_separator(mut self, separator: char) -> Self {
        self.thousands_separator = separator;
        self
    }
}
