//! Error types for Saca.
//!
//! The trie operations themselves never fail. Errors only surface while
//! building a trie from configuration or parsing user-supplied settings.

use thiserror::Error;

/// The main error type for Saca operations.
#[derive(Error, Debug)]
pub enum SacaError {
    /// A configuration value is out of range or inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An argument could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Saca operations.
pub type Result<T> = std::result::Result<T, SacaError>;

impl SacaError {
    /// Create a new configuration error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SacaError::InvalidConfig(msg.into())
    }

    /// Create a new argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SacaError::InvalidArgument(msg.into())
    }
}
