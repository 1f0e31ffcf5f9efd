//! LanguageIndex - row store, index set and query engine
//!
//! Queries are applied in order of specificity by [`LanguageIndex::natural_language`]:
//! 1. Exact match on the raw or case-folded index
//! 2. Substring match, ranked by edit distance to the query
//! 3. Phonetic match, ranked by edit distance from phonetic key to query codes

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use ahash::AHasher;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::keys::{fold, IndexMode, IndexSet};
use super::rows::{RowId, RowStore};
use super::strategies::{self, RankedKey};
use crate::config::IndexConfig;
use crate::distance::{EditDistance, Levenshtein};
use crate::error::IndexResult;
use crate::phonetic::{DoubleMetaphoneEncoder, PhoneticCodes, PhoneticEncoder};

/// Query strategy selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    Exact,
    Substring,
    Phonetic,
    #[default]
    NaturalLanguage,
}

/// Index size counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub rows: usize,
    pub next_id: u64,
    pub raw_keys: usize,
    pub folded_keys: usize,
    pub phonetic_keys: usize,
}

/// In-memory text-matching index over rows of string columns.
///
/// Mutation takes `&mut self` and queries take `&self`, so a single owner
/// gets writer/reader exclusion from the borrow checker. Use
/// [`SharedIndex`](crate::SharedIndex) to share one index across threads.
#[derive(Clone)]
pub struct LanguageIndex {
    rows: RowStore,
    keys: IndexSet,
    encoder: Arc<dyn PhoneticEncoder>,
    distance: Arc<dyn EditDistance>,
    config: IndexConfig,
}

impl Default for LanguageIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LanguageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageIndex")
            .field("rows", &self.rows.len())
            .field("next_id", &self.rows.next_id())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LanguageIndex {
    /// Create an index with Double Metaphone and Levenshtein primitives.
    pub fn new() -> Self {
        Self::with_primitives(DoubleMetaphoneEncoder, Levenshtein)
    }

    /// Create an index with a validated custom configuration.
    pub fn with_config(config: IndexConfig) -> IndexResult<Self> {
        config.validate()?;
        let mut index = Self::new();
        index.config = config;
        Ok(index)
    }

    /// Create an index with injected phonetic and edit-distance primitives.
    pub fn with_primitives<P, D>(encoder: P, distance: D) -> Self
    where
        P: PhoneticEncoder + 'static,
        D: EditDistance + 'static,
    {
        Self {
            rows: RowStore::new(),
            keys: IndexSet::new(),
            encoder: Arc::new(encoder),
            distance: Arc::new(distance),
            config: IndexConfig::default(),
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    // --- Row store -------------------------------------------------------

    /// Insert a row and index every column.
    ///
    /// Fails with `InvalidArgument` for an empty row, before any state changes.
    pub fn add_row<I, S>(&mut self, columns: I) -> IndexResult<RowId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let id = self.rows.add(columns)?;
        if let Some(stored) = self.rows.get(id) {
            self.keys.on_row_added(id, stored, self.encoder.as_ref());
            debug!(row_id = %id, columns = stored.len(), "Row added");
        }
        Ok(id)
    }

    /// Remove a row and all of its index entries.
    ///
    /// Unknown or already removed ids are a no-op and return `false`.
    pub fn remove_row(&mut self, id: RowId) -> bool {
        match self.rows.remove(id) {
            Some(columns) => {
                self.keys.on_row_removed(id, &columns, self.encoder.as_ref());
                debug!(row_id = %id, columns = columns.len(), "Row removed");
                true
            }
            None => {
                trace!(row_id = %id, "Remove of unknown row ignored");
                false
            }
        }
    }

    pub fn column(&self, id: RowId, column: usize) -> Option<&str> {
        self.rows.column(id, column)
    }

    pub fn row(&self, id: RowId) -> Option<&[String]> {
        self.rows.get(id)
    }

    pub fn column_count(&self, id: RowId) -> Option<usize> {
        self.rows.column_count(id)
    }

    pub fn contains(&self, id: RowId) -> bool {
        self.rows.contains(id)
    }

    /// Number of live rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Live rows in ascending id order.
    pub fn rows(&self) -> impl Iterator<Item = (RowId, &[String])> {
        self.rows.iter()
    }

    /// Remove every row. Ids already handed out stay retired.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.keys.clear();
        debug!(next_id = %self.rows.next_id(), "Index cleared");
    }

    // --- Index set -------------------------------------------------------

    /// Ids stored under `key` in the selected map, ascending.
    pub fn lookup_exact(&self, key: &str, mode: IndexMode) -> Vec<RowId> {
        self.keys.lookup_exact(key, mode)
    }

    /// Keys of the selected map containing `substring`, sorted.
    pub fn keys_containing(&self, substring: &str, mode: IndexMode) -> Vec<String> {
        let mut keys: Vec<String> = self
            .keys
            .keys_containing(substring, mode, self.config.parallel_threshold)
            .into_iter()
            .map(str::to_string)
            .collect();
        keys.sort_unstable();
        keys
    }

    // --- Query engine ----------------------------------------------------

    /// Rows with a column equal to `search`.
    ///
    /// With `ignore_case` the folded index is consulted with a folded query;
    /// otherwise the raw index with `search` as given.
    pub fn exact(&self, search: &str, ignore_case: bool) -> Vec<RowId> {
        let (mode, key) = case_mode(search, ignore_case);
        let ids = self.keys.lookup_exact(&key, mode);
        trace!(search, ignore_case, hits = ids.len(), "Exact search");
        ids
    }

    /// Rows with a column containing `search`, closest keys first.
    ///
    /// A row reached through two matching column values appears twice.
    pub fn substring(&self, search: &str, ignore_case: bool) -> Vec<RowId> {
        let (mode, query) = case_mode(search, ignore_case);
        let candidates = self
            .keys
            .keys_containing(&query, mode, self.config.parallel_threshold);
        let ranked = strategies::rank_by_distance(candidates, &query, self.distance.as_ref());
        let ids = self.flatten(&ranked, mode);
        trace!(
            search,
            ignore_case,
            keys = ranked.len(),
            hits = ids.len(),
            "Substring search"
        );
        ids
    }

    /// Rows whose column values sound like `search`, closest codes first.
    ///
    /// A phonetic key matches when it contains either code of `search`.
    pub fn phonetic(&self, search: &str) -> Vec<RowId> {
        let codes = self.encoder.encode(search);
        if codes.is_empty() {
            trace!(search, "Phonetic search skipped, no codes");
            return Vec::new();
        }

        let candidates = self.keys.keys_matching(
            IndexMode::Phonetic,
            self.config.parallel_threshold,
            |key| codes.codes().any(|code| strategies::contains(key, code)),
        );
        let ranked =
            strategies::rank_with(candidates, |key| self.code_distance(key, &codes));
        let ids = self.flatten(&ranked, IndexMode::Phonetic);
        trace!(
            search,
            primary = %codes.primary,
            alternate = %codes.alternate,
            keys = ranked.len(),
            hits = ids.len(),
            "Phonetic search"
        );
        ids
    }

    /// Exact, then substring, then phonetic matches, each id at most once.
    pub fn natural_language(&self, search: &str, ignore_case: bool) -> Vec<RowId> {
        let mut seen: HashSet<RowId, ahash::RandomState> = HashSet::default();
        let mut ids = Vec::new();

        let tiers = [
            self.exact(search, ignore_case),
            self.substring(search, ignore_case),
            self.phonetic(search),
        ];
        for id in tiers.into_iter().flatten() {
            if seen.insert(id) {
                ids.push(id);
            }
        }

        trace!(search, ignore_case, hits = ids.len(), "Natural language search");
        ids
    }

    /// Dispatch to one of the query strategies.
    ///
    /// `ignore_case` has no effect on phonetic search.
    pub fn search(&self, mode: SearchMode, search: &str, ignore_case: bool) -> Vec<RowId> {
        match mode {
            SearchMode::Exact => self.exact(search, ignore_case),
            SearchMode::Substring => self.substring(search, ignore_case),
            SearchMode::Phonetic => self.phonetic(search),
            SearchMode::NaturalLanguage => self.natural_language(search, ignore_case),
        }
    }

    // --- Introspection ---------------------------------------------------

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            rows: self.rows.len(),
            next_id: self.rows.next_id().get(),
            raw_keys: self.keys.key_count(IndexMode::Raw),
            folded_keys: self.keys.key_count(IndexMode::Folded),
            phonetic_keys: self.keys.key_count(IndexMode::Phonetic),
        }
    }

    /// Digest of the live rows, for change detection by callers.
    pub fn fingerprint(&self) -> String {
        let mut hasher = AHasher::default();
        for (id, columns) in self.rows.iter() {
            id.hash(&mut hasher);
            columns.hash(&mut hasher);
        }
        format!("{:016x}", hasher.finish())
    }

    /// True if `id` appears under any key of any index map.
    pub fn is_indexed(&self, id: RowId) -> bool {
        self.keys.references(id)
    }

    fn flatten(&self, ranked: &[RankedKey<'_>], mode: IndexMode) -> Vec<RowId> {
        strategies::flatten(ranked, |key| self.keys.get(key, mode))
    }

    /// Distance from a stored `primary;alternate` key to the query's primary
    /// code, or to its alternate code when that is closer.
    fn code_distance(&self, key: &str, query: &PhoneticCodes) -> usize {
        query
            .codes()
            .map(|code| self.distance.distance(key, code))
            .min()
            .unwrap_or(usize::MAX)
    }
}

fn case_mode(search: &str, ignore_case: bool) -> (IndexMode, Cow<'_, str>) {
    if ignore_case {
        (IndexMode::Folded, Cow::Owned(fold(search)))
    } else {
        (IndexMode::Raw, Cow::Borrowed(search))
    }
}
