//! Error types for anvil-core

use thiserror::Error;

/// Result type alias using anvil-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Anvil
#[derive(Error, Debug)]
pub enum Error {
    /// Request field missing or malformed
    #[error("Invalid template request: {message}")]
    InvalidRequest { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }
}
