//! Error types for Wisp

use thiserror::Error;

/// The main error type for Wisp operations
#[derive(Debug, Error)]
pub enum WispError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid enum value: {value} is not one of {allowed:?}")]
    InvalidEnumValue {
        value: String,
        allowed: Vec<String>,
    },

    #[error("Replay script error: {0}")]
    ScriptError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

/// Result type alias for Wisp operations
pub type Result<T> = std::result::Result<T, WispError>;

impl From<toml::de::Error> for WispError {
    fn from(err: toml::de::Error) -> Self {
        WispError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for WispError {
    fn from(err: toml::ser::Error) -> Self {
        WispError::TomlSerError(err.to_string())
    }
}
