//! # Lexis Shared Rust Library
//!
//! This crate provides shared infrastructure for applications embedding the
//! Lexis index:
//! - **config**: Loading an index configuration from JSON
//! - **error**: Common error types with context
//! - **tracing**: Logging setup (EnvFilter, compact output)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lexis::{config, Result};
//!
//! fn open() -> Result<lexis::SharedIndex> {
//!     lexis::tracing::init();
//!     let config = config::load("lexis.json")?;
//!     Ok(lexis::SharedIndex::with_config(config)?)
//! }
//! ```

pub mod config;
pub mod error;
pub mod tracing;

// Re-export commonly used items at crate root
pub use error::{Error, Result};
pub use lexis_core::{IndexConfig, LanguageIndex, RowId, SearchMode, SharedIndex};
