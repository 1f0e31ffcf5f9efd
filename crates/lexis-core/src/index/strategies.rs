//! Key matching and ranking helpers
//!
//! Platform-specific implementations:
//! - `simd`: substring containment via memchr
//! - otherwise: `str::contains`

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::distance::EditDistance;
use crate::index::rows::RowId;

/// An index key paired with its distance to the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedKey<'a> {
    pub key: &'a str,
    pub distance: usize,
}

impl Ord for RankedKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| self.key.cmp(other.key))
    }
}

impl PartialOrd for RankedKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Substring containment test used by every key scan.
#[inline]
pub fn contains(haystack: &str, needle: &str) -> bool {
    #[cfg(feature = "simd")]
    {
        memchr::memmem::find(haystack.as_bytes(), needle.as_bytes()).is_some()
    }

    #[cfg(not(feature = "simd"))]
    {
        haystack.contains(needle)
    }
}

/// Rank keys ascending by distance to `query`, ties by key.
pub fn rank_by_distance<'a>(
    keys: Vec<&'a str>,
    query: &str,
    distance: &dyn EditDistance,
) -> Vec<RankedKey<'a>> {
    rank_with(keys, |key| distance.distance(key, query))
}

/// Rank keys ascending by an arbitrary distance function, ties by key.
pub fn rank_with<'a, F>(keys: Vec<&'a str>, mut score: F) -> Vec<RankedKey<'a>>
where
    F: FnMut(&str) -> usize,
{
    let mut ranked: Vec<RankedKey<'a>> = keys
        .into_iter()
        .map(|key| RankedKey {
            distance: score(key),
            key,
        })
        .collect();
    ranked.sort();
    ranked
}

/// Concatenate each key's row ids in ranked order.
///
/// Ids are not deduplicated across keys: a row reached through two
/// different column values appears once per value.
pub fn flatten<'a, L>(ranked: &[RankedKey<'_>], lookup: L) -> Vec<RowId>
where
    L: Fn(&str) -> Option<&'a BTreeSet<RowId>>,
{
    let mut ids = Vec::new();
    for entry in ranked {
        if let Some(set) = lookup(entry.key) {
            ids.extend(set.iter().copied());
        }
    }
    ids
}
