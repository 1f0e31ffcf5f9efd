//! Row store
//!
//! Live rows are kept in an ordered map keyed by id. Ids come from a
//! counter that only moves forward, so removal never frees an id for reuse.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IndexError, IndexResult};

/// Stable identifier of an inserted row.
///
/// Assigned from a monotonically increasing counter; retired on removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub u64);

impl RowId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RowId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Storage for row data, keyed by [`RowId`].
#[derive(Debug, Default, Clone)]
pub struct RowStore {
    rows: BTreeMap<RowId, Vec<String>>,
    next: u64,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a row under the next id.
    ///
    /// Returns `InvalidArgument` if `columns` is empty.
    pub fn add(&mut self, columns: Vec<String>) -> IndexResult<RowId> {
        if columns.is_empty() {
            return Err(IndexError::InvalidArgument(
                "row must have at least one column".to_string(),
            ));
        }
        let id = RowId(self.next);
        self.next += 1;
        self.rows.insert(id, columns);
        Ok(id)
    }

    /// Drop a row and hand back its columns.
    ///
    /// Unknown or already removed ids return `None`.
    pub fn remove(&mut self, id: RowId) -> Option<Vec<String>> {
        self.rows.remove(&id)
    }

    pub fn get(&self, id: RowId) -> Option<&[String]> {
        self.rows.get(&id).map(Vec::as_slice)
    }

    pub fn column(&self, id: RowId, column: usize) -> Option<&str> {
        self.get(id)?.get(column).map(String::as_str)
    }

    pub fn column_count(&self, id: RowId) -> Option<usize> {
        self.get(id).map(<[String]>::len)
    }

    pub fn contains(&self, id: RowId) -> bool {
        self.rows.contains_key(&id)
    }

    /// Number of live rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The id the next insertion will receive.
    pub fn next_id(&self) -> RowId {
        RowId(self.next)
    }

    /// Live rows in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, &[String])> {
        self.rows.iter().map(|(id, columns)| (*id, columns.as_slice()))
    }

    /// Drop every row. The id counter keeps running.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
