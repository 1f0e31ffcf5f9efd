//! Text-matching index
//!
//! Rows of string columns are stored under stable ids and indexed three
//! ways: raw, case-folded and phonetic. Queries:
//!
//! 1. Exact match (raw or folded key lookup)
//! 2. Substring match (key scan, ranked by edit distance)
//! 3. Phonetic match (phonetic key scan, ranked by code edit distance)
//! 4. Natural language (1, 2, 3 concatenated, each row once)
//!
//! # Example
//!
//! ```rust
//! use lexis_core::index::{LanguageIndex, RowId};
//!
//! let mut index = LanguageIndex::new();
//! let alice = index.add_row(["Alice", "Wonderland"]).unwrap();
//! let lower = index.add_row(["alice", "Springs"]).unwrap();
//!
//! assert_eq!(index.exact("Alice", false), vec![alice]);
//! assert_eq!(index.exact("ALICE", true), vec![alice, lower]);
//! assert_eq!(alice, RowId(0));
//! ```

mod engine;
mod keys;
mod rows;
mod strategies;

pub use engine::{IndexStats, LanguageIndex, SearchMode};
pub use keys::{fold, DerivedKeys, IndexMode, IndexSet, RowIdSet};
pub use rows::{RowId, RowStore};
