//! Lexis Core Engine
//!
//! In-memory, single-writer text-matching index. Rows of string columns are
//! indexed raw, case-folded and phonetically, and resolved against noisy,
//! user-typed strings.
//!
//! # Features
//!
//! - `native` - Enable all native optimizations (SIMD, parallel)
//! - `simd` - SIMD-accelerated substring search via memchr
//! - `parallel` - Parallel key scans via rayon for large indices
//!
//! # Example
//!
//! ```rust
//! use lexis_core::LanguageIndex;
//!
//! let mut index = LanguageIndex::new();
//! let smith = index.add_row(["Smith"]).unwrap();
//! let smyth = index.add_row(["Smyth"]).unwrap();
//!
//! assert_eq!(index.phonetic("Smith"), vec![smith, smyth]);
//! assert_eq!(index.natural_language("smith", true), vec![smith, smyth]);
//! ```

pub mod config;
pub mod distance;
pub mod error;
pub mod index;
pub mod phonetic;
pub mod request;
pub mod shared;

// Re-export main types at crate root
pub use config::IndexConfig;
pub use distance::{EditDistance, Levenshtein};
pub use error::{IndexError, IndexResult};
pub use index::{IndexMode, IndexStats, LanguageIndex, RowId, SearchMode};
pub use phonetic::{DoubleMetaphoneEncoder, PhoneticCodes, PhoneticEncoder};
pub use request::{search_json, SearchRequest, SearchResponse};
pub use shared::SharedIndex;
