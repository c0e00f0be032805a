//! Domain error types

use thiserror::Error;

/// Error when a configuration enum value cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind}: \"{input}\". Valid values are: {valid}")]
pub struct ParseSettingError {
    pub kind: &'static str,
    pub input: String,
    pub valid: &'static str,
}

impl ParseSettingError {
    pub(crate) fn new(kind: &'static str, input: &str, valid: &'static str) -> Self {
        Self {
            kind,
            input: input.to_string(),
            valid,
        }
    }
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
