//! Error types for aco operations.
//!
//! Graph-local anomalies (missing nodes/edges) are absorbed where they
//! are detected and never surface as errors; only configuration
//! validation and I/O propagate to the caller.

use std::error::Error;
use std::fmt;

/// Result type for aco operations.
pub type Result<T> = std::result::Result<T, AcoError>;

/// Errors that can occur during aco operations.
#[derive(Debug, Clone)]
pub enum AcoError {
    /// Configuration errors.
    Config(ConfigError),
    /// I/O errors (wrapped).
    Io(String),
    /// Serialization errors.
    Serialization(String),
}

impl fmt::Display for AcoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcoError::Config(e) => write!(f, "Config error: {}", e),
            AcoError::Io(msg) => write!(f, "I/O error: {}", msg),
            AcoError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for AcoError {}

impl From<std::io::Error> for AcoError {
    fn from(e: std::io::Error) -> Self {
        AcoError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for AcoError {
    fn from(e: serde_json::Error) -> Self {
        AcoError::Serialization(e.to_string())
    }
}

/// Configuration errors.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Invalid value.
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// Numeric field outside its allowed range.
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid value for {}: {} ({})", field, value, reason)
            }
            ConfigError::OutOfRange {
                field,
                min,
                max,
                value,
            } => {
                write!(
                    f,
                    "{} out of range: {} (must be {}-{})",
                    field, value, min, max
                )
            }
        }
    }
}

// Convenience constructors
impl AcoError {
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        AcoError::Config(ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        })
    }

    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        AcoError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }
}
