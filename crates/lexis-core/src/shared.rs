//! Thread-safe handle to a [`LanguageIndex`]
//!
//! One writer, many readers: mutations take the write lock, queries the read
//! lock, so no query observes a row whose index entries are half applied.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::IndexConfig;
use crate::error::IndexResult;
use crate::index::{IndexStats, LanguageIndex, RowId, SearchMode};
use crate::request::{SearchRequest, SearchResponse};

/// Cloneable, thread-safe index handle. Clones share the same index.
#[derive(Debug, Clone, Default)]
pub struct SharedIndex {
    inner: Arc<RwLock<LanguageIndex>>,
}

impl From<LanguageIndex> for SharedIndex {
    fn from(index: LanguageIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }
}

impl SharedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: IndexConfig) -> IndexResult<Self> {
        LanguageIndex::with_config(config).map(Self::from)
    }

    pub fn add_row<I, S>(&self, columns: I) -> IndexResult<RowId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        // Build the row before taking the lock
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        self.inner.write().add_row(columns)
    }

    pub fn remove_row(&self, id: RowId) -> bool {
        self.inner.write().remove_row(id)
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn column(&self, id: RowId, column: usize) -> Option<String> {
        self.inner.read().column(id, column).map(str::to_string)
    }

    pub fn row(&self, id: RowId) -> Option<Vec<String>> {
        self.inner.read().row(id).map(<[String]>::to_vec)
    }

    pub fn column_count(&self, id: RowId) -> Option<usize> {
        self.inner.read().column_count(id)
    }

    pub fn row_count(&self) -> usize {
        self.inner.read().row_count()
    }

    pub fn exact(&self, search: &str, ignore_case: bool) -> Vec<RowId> {
        self.inner.read().exact(search, ignore_case)
    }

    pub fn substring(&self, search: &str, ignore_case: bool) -> Vec<RowId> {
        self.inner.read().substring(search, ignore_case)
    }

    pub fn phonetic(&self, search: &str) -> Vec<RowId> {
        self.inner.read().phonetic(search)
    }

    pub fn natural_language(&self, search: &str, ignore_case: bool) -> Vec<RowId> {
        self.inner.read().natural_language(search, ignore_case)
    }

    pub fn search(&self, mode: SearchMode, search: &str, ignore_case: bool) -> Vec<RowId> {
        self.inner.read().search(mode, search, ignore_case)
    }

    pub fn execute(&self, request: &SearchRequest) -> IndexResult<SearchResponse> {
        self.inner.read().execute(request)
    }

    pub fn stats(&self) -> IndexStats {
        self.inner.read().stats()
    }

    /// Point-in-time copy of the index, independent of later mutations.
    pub fn snapshot(&self) -> LanguageIndex {
        self.inner.read().clone()
    }

    /// Run `f` against the index under a single read lock.
    pub fn read<R>(&self, f: impl FnOnce(&LanguageIndex) -> R) -> R {
        f(&*self.inner.read())
    }
}
