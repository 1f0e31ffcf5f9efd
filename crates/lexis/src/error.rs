//! Common error types for Lexis Rust components.

use lexis_core::IndexError;
use thiserror::Error;

/// Common error type for Lexis operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Index error
    #[error("index error: {0}")]
    Index(#[from] IndexError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias using Lexis Error.
pub type Result<T> = std::result::Result<T, Error>;
