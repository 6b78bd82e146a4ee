//! Core error types for focusbuddy-core.
//!
//! Only storage and configuration can fail. The clock and the ledger rules
//! are total, and corrupt progress data is recovered rather than reported,
//! so these errors never reach the user during a normal session.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusbuddy-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Progress record storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors reading or writing the progress record.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The record file exists but could not be read
    #[error("Failed to read progress record at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record file could not be written or moved into place
    #[error("Failed to write progress record at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record file is not a valid progress record
    #[error("Malformed progress record at {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    /// The data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Failed to render configuration as TOML
    #[error("Failed to serialize configuration: {0}")]
    SerializeFailed(String),
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SerializeFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
