//! JSON request surface for embedding callers.
//!
//! A request names the query strategy and the search string. The search
//! string is optional on the wire so that callers in other languages can
//! pass `null`; an absent search is rejected with `InvalidArgument`, while
//! an empty string is a legal query.

use serde::{Deserialize, Serialize};

use crate::error::{IndexError, IndexResult};
use crate::index::{LanguageIndex, RowId, SearchMode};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub search: Option<String>,
    #[serde(default)]
    pub mode: SearchMode,
    #[serde(default)]
    pub ignore_case: bool,
}

impl SearchRequest {
    pub fn new(search: impl Into<String>, mode: SearchMode) -> Self {
        Self {
            search: Some(search.into()),
            mode,
            ignore_case: false,
        }
    }

    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub ids: Vec<RowId>,
    pub total: usize,
}

impl LanguageIndex {
    /// Run a [`SearchRequest`].
    pub fn execute(&self, request: &SearchRequest) -> IndexResult<SearchResponse> {
        let search = request
            .search
            .as_deref()
            .ok_or_else(|| IndexError::InvalidArgument("search string is required".to_string()))?;
        let ids = self.search(request.mode, search, request.ignore_case);
        let total = ids.len();
        Ok(SearchResponse { ids, total })
    }
}

/// JSON wrapper around [`LanguageIndex::execute`].
///
/// Input: `{"search": "...", "mode": "natural_language", "ignore_case": true}`
/// Output: `{"ids": [...], "total": N}` or `{"error": "..."}`
pub fn search_json(index: &LanguageIndex, input: &str) -> String {
    let request: SearchRequest = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(e) => {
            return error_json(&IndexError::Serialization(format!("invalid JSON: {}", e)));
        }
    };

    match index.execute(&request) {
        Ok(response) => match serde_json::to_string(&response) {
            Ok(json) => json,
            Err(e) => error_json(&IndexError::Serialization(e.to_string())),
        },
        Err(e) => error_json(&e),
    }
}

fn error_json(error: &IndexError) -> String {
    serde_json::json!({ "error": error.to_string() }).to_string()
}
