//! Error types for anvil-store

use thiserror::Error;

/// Result type alias using anvil-store's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration store error types
#[derive(Error, Debug)]
pub enum Error {
    /// Store file not found
    #[error("Store file not found: {path}")]
    StoreNotFound { path: String },

    /// Store file failed referential checks
    #[error("Invalid store file: {message}")]
    InvalidStore { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a store not found error
    pub fn store_not_found(path: impl Into<String>) -> Self {
        Self::StoreNotFound { path: path.into() }
    }

    /// Create an invalid store error
    pub fn invalid_store(message: impl Into<String>) -> Self {
        Self::InvalidStore {
            message: message.into(),
        }
    }
}
