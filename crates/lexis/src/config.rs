//! Index configuration loading

use std::fs;
use std::path::Path;

use lexis_core::{IndexConfig, IndexError};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Load an index configuration from a JSON file.
///
/// Missing fields take their defaults; invalid values are rejected.
pub fn load(path: impl AsRef<Path>) -> Result<IndexConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let config = from_json_str(&text).inspect_err(|e| {
        warn!(path = %path.display(), error = %e, "Rejected index config");
    })?;
    info!(
        path = %path.display(),
        parallel_threshold = config.parallel_threshold,
        "Loaded index config"
    );
    Ok(config)
}

/// Load a configuration file if it exists, defaults otherwise.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<IndexConfig> {
    let path = path.as_ref();
    if path.exists() {
        load(path)
    } else {
        info!(path = %path.display(), "No index config, using defaults");
        Ok(IndexConfig::default())
    }
}

/// Parse and validate a configuration from JSON text.
///
/// Rejected values surface as [`Error::Config`]; malformed JSON as
/// [`Error::Index`].
pub fn from_json_str(input: &str) -> Result<IndexConfig> {
    IndexConfig::from_json_str(input).map_err(|e| match e {
        IndexError::Config(msg) => Error::Config(msg),
        other => Error::Index(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_str() {
        let config = from_json_str(r#"{"parallel_threshold": 10}"#).unwrap();
        assert_eq!(config.parallel_threshold, 10);
    }

    #[test]
    fn test_from_json_str_invalid_value() {
        let result = from_json_str(r#"{"parallel_threshold": 0}"#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_from_json_str_malformed() {
        let result = from_json_str("[1, 2");
        assert!(matches!(
            result,
            Err(Error::Index(IndexError::Serialization(_)))
        ));
    }
}
