//! Error types for careerchat-core

use thiserror::Error;

/// Main error type for the careerchat-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Missing or empty required field
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid analytics period (missing year, month out of range)
    #[error("invalid period: {0}")]
    InvalidPeriod(String),

    /// FAQ entry not found
    #[error("question not found: {0}")]
    NotFound(i64),

    /// External answer service failure
    #[error("upstream error: {0}")]
    Upstream(String),
}

/// Result type alias for careerchat-core
pub type Result<T> = std::result::Result<T, Error>;
