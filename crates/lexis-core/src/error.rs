//! Index error types

use thiserror::Error;

/// Errors that can occur during index operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// A required input was absent or empty
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid index configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;
