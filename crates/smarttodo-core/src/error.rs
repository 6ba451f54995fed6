//! Core error types for smarttodo-core.
//!
//! The scoring and analytics engines are infallible; everything here belongs
//! to the edges around them (configuration, snapshot loading, the in-memory
//! task store).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for smarttodo-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot loading errors
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Task store errors
    #[error("Task store error: {0}")]
    Store(#[from] StoreError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not determine or create the config directory
    #[error("Config directory unavailable: {0}")]
    DirUnavailable(String),

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
}

/// Errors raised while reading a task snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Failed to read the snapshot source
    #[error("Failed to read snapshot from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot content is not a task list
    #[error("Malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors raised by a task store.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// No task with the given id
    #[error("Task not found: {id}")]
    TaskNotFound { id: String },

    /// Invalid field value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
