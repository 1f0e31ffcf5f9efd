//! Index set: raw, case-folded and phonetic key maps
//!
//! Every column value of every live row is present in all three maps under
//! its derived key. Keys whose id set becomes empty are pruned.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::index::rows::RowId;
use crate::index::strategies;
use crate::phonetic::PhoneticEncoder;

/// Ordered, duplicate-free set of row ids stored under one key.
pub type RowIdSet = BTreeSet<RowId>;

type KeyMap = HashMap<String, RowIdSet, ahash::RandomState>;

/// Which key map to consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexMode {
    /// Column values as inserted (case-sensitive)
    Raw,
    /// Lower-cased column values
    Folded,
    /// `primary;alternate` phonetic codes of column values
    Phonetic,
}

/// The three keys derived from one column value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedKeys {
    pub raw: String,
    pub folded: String,
    pub phonetic: String,
}

impl DerivedKeys {
    pub fn derive(value: &str, encoder: &dyn PhoneticEncoder) -> Self {
        Self {
            raw: value.to_string(),
            folded: fold(value),
            phonetic: encoder.encode(value).key(),
        }
    }
}

/// Case folding applied to folded keys and to `ignore_case` queries.
pub fn fold(value: &str) -> String {
    value.to_lowercase()
}

#[derive(Debug, Default, Clone)]
pub struct IndexSet {
    raw: KeyMap,
    folded: KeyMap,
    phonetic: KeyMap,
}

impl IndexSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` under the derived keys of every column.
    pub fn on_row_added(&mut self, id: RowId, columns: &[String], encoder: &dyn PhoneticEncoder) {
        for value in columns {
            let keys = DerivedKeys::derive(value, encoder);
            insert(&mut self.raw, keys.raw, id);
            insert(&mut self.folded, keys.folded, id);
            insert(&mut self.phonetic, keys.phonetic, id);
        }
    }

    /// Drop `id` from the derived keys of every column, pruning empty keys.
    pub fn on_row_removed(
        &mut self,
        id: RowId,
        columns: &[String],
        encoder: &dyn PhoneticEncoder,
    ) {
        for value in columns {
            let keys = DerivedKeys::derive(value, encoder);
            remove(&mut self.raw, &keys.raw, id);
            remove(&mut self.folded, &keys.folded, id);
            remove(&mut self.phonetic, &keys.phonetic, id);
        }
    }

    /// The id set stored under `key`, if any.
    pub fn get(&self, key: &str, mode: IndexMode) -> Option<&RowIdSet> {
        self.map(mode).get(key)
    }

    /// Ids stored under `key`, ascending. Empty if the key is absent.
    pub fn lookup_exact(&self, key: &str, mode: IndexMode) -> Vec<RowId> {
        self.get(key, mode)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Keys of the selected map that contain `substring`. Unordered.
    pub fn keys_containing(
        &self,
        substring: &str,
        mode: IndexMode,
        parallel_threshold: usize,
    ) -> Vec<&str> {
        self.keys_matching(mode, parallel_threshold, |key| {
            strategies::contains(key, substring)
        })
    }

    /// Keys of the selected map accepted by `pred`. Unordered.
    ///
    /// Linear in the number of distinct keys.
    #[cfg(feature = "parallel")]
    pub fn keys_matching<P>(&self, mode: IndexMode, parallel_threshold: usize, pred: P) -> Vec<&str>
    where
        P: Fn(&str) -> bool + Sync,
    {
        let map = self.map(mode);
        if map.len() >= parallel_threshold {
            map.par_iter()
                .map(|(key, _)| key.as_str())
                .filter(|key| pred(*key))
                .collect()
        } else {
            map.keys().map(String::as_str).filter(|key| pred(*key)).collect()
        }
    }

    /// Keys of the selected map accepted by `pred`. Unordered.
    ///
    /// Linear in the number of distinct keys.
    #[cfg(not(feature = "parallel"))]
    pub fn keys_matching<P>(&self, mode: IndexMode, _parallel_threshold: usize, pred: P) -> Vec<&str>
    where
        P: Fn(&str) -> bool + Sync,
    {
        self.map(mode)
            .keys()
            .map(String::as_str)
            .filter(|key| pred(*key))
            .collect()
    }

    /// Number of distinct keys in the selected map.
    pub fn key_count(&self, mode: IndexMode) -> usize {
        self.map(mode).len()
    }

    /// True if `id` appears under any key of any map.
    pub fn references(&self, id: RowId) -> bool {
        [&self.raw, &self.folded, &self.phonetic]
            .into_iter()
            .any(|map| map.values().any(|set| set.contains(&id)))
    }

    pub fn clear(&mut self) {
        self.raw.clear();
        self.folded.clear();
        self.phonetic.clear();
    }

    fn map(&self, mode: IndexMode) -> &KeyMap {
        match mode {
            IndexMode::Raw => &self.raw,
            IndexMode::Folded => &self.folded,
            IndexMode::Phonetic => &self.phonetic,
        }
    }
}

fn insert(map: &mut KeyMap, key: String, id: RowId) {
    map.entry(key).or_default().insert(id);
}

fn remove(map: &mut KeyMap, key: &str, id: RowId) {
    if let Some(set) = map.get_mut(key) {
        set.remove(&id);
        if set.is_empty() {
            map.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phonetic::{DoubleMetaphoneEncoder, PhoneticCodes};

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_add_populates_all_maps() {
        let mut set = IndexSet::new();
        set.on_row_added(RowId(0), &row(&["Alice"]), &DoubleMetaphoneEncoder);

        assert_eq!(set.lookup_exact("Alice", IndexMode::Raw), vec![RowId(0)]);
        assert_eq!(set.lookup_exact("alice", IndexMode::Folded), vec![RowId(0)]);
        let phonetic = DoubleMetaphoneEncoder.encode("Alice").key();
        assert_eq!(set.lookup_exact(&phonetic, IndexMode::Phonetic), vec![RowId(0)]);
        assert!(set.lookup_exact("alice", IndexMode::Raw).is_empty());
    }

    #[test]
    fn test_add_is_idempotent_per_key() {
        let mut set = IndexSet::new();
        set.on_row_added(RowId(3), &row(&["same", "same"]), &DoubleMetaphoneEncoder);
        assert_eq!(set.lookup_exact("same", IndexMode::Raw), vec![RowId(3)]);
    }

    #[test]
    fn test_ids_ascending_per_key() {
        let mut set = IndexSet::new();
        set.on_row_added(RowId(5), &row(&["x"]), &DoubleMetaphoneEncoder);
        set.on_row_added(RowId(1), &row(&["x"]), &DoubleMetaphoneEncoder);
        assert_eq!(set.lookup_exact("x", IndexMode::Raw), vec![RowId(1), RowId(5)]);
    }

    #[test]
    fn test_remove_prunes_empty_keys() {
        let mut set = IndexSet::new();
        let columns = row(&["Alice", "Wonderland"]);
        set.on_row_added(RowId(0), &columns, &DoubleMetaphoneEncoder);
        set.on_row_removed(RowId(0), &columns, &DoubleMetaphoneEncoder);

        assert_eq!(set.key_count(IndexMode::Raw), 0);
        assert_eq!(set.key_count(IndexMode::Folded), 0);
        assert_eq!(set.key_count(IndexMode::Phonetic), 0);
        assert!(!set.references(RowId(0)));
    }

    #[test]
    fn test_remove_keeps_other_rows() {
        let mut set = IndexSet::new();
        set.on_row_added(RowId(0), &row(&["Alice"]), &DoubleMetaphoneEncoder);
        set.on_row_added(RowId(1), &row(&["alice"]), &DoubleMetaphoneEncoder);
        set.on_row_removed(RowId(0), &row(&["Alice"]), &DoubleMetaphoneEncoder);

        assert_eq!(set.lookup_exact("alice", IndexMode::Folded), vec![RowId(1)]);
        assert!(set.get("Alice", IndexMode::Raw).is_none());
    }

    #[test]
    fn test_keys_containing() {
        let mut set = IndexSet::new();
        set.on_row_added(RowId(0), &row(&["Hello"]), &DoubleMetaphoneEncoder);
        set.on_row_added(RowId(1), &row(&["bell"]), &DoubleMetaphoneEncoder);

        let mut raw = set.keys_containing("ell", IndexMode::Raw, 1000);
        raw.sort_unstable();
        assert_eq!(raw, vec!["Hello", "bell"]);
        assert!(set.keys_containing("HELL", IndexMode::Folded, 1000).is_empty());
        assert_eq!(set.keys_containing("hell", IndexMode::Folded, 1000), vec!["hello"]);
    }

    #[test]
    fn test_keys_matching_above_threshold() {
        let mut set = IndexSet::new();
        for (i, value) in ["one", "two", "three", "four"].into_iter().enumerate() {
            set.on_row_added(RowId(i as u64), &row(&[value]), &DoubleMetaphoneEncoder);
        }
        let mut keys = set.keys_matching(IndexMode::Raw, 2, |key| key.contains('o'));
        keys.sort_unstable();
        assert_eq!(keys, vec!["four", "one", "two"]);
    }

    #[test]
    fn test_custom_encoder_keys() {
        let encoder = |value: &str| PhoneticCodes::new(value.len().to_string(), "");
        let mut set = IndexSet::new();
        set.on_row_added(RowId(0), &row(&["abc"]), &encoder);
        assert_eq!(set.lookup_exact("3;", IndexMode::Phonetic), vec![RowId(0)]);
    }
}
