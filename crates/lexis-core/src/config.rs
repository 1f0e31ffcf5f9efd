//! Index configuration

use serde::{Deserialize, Serialize};

use crate::error::{IndexError, IndexResult};

/// Tuning knobs for a [`LanguageIndex`](crate::LanguageIndex).
///
/// None of these affect query results, only how key scans are executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Minimum number of distinct keys before a scan is split across
    /// threads. Only consulted with the `parallel` feature.
    pub parallel_threshold: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 1000,
        }
    }
}

impl IndexConfig {
    /// Check the configuration for values the index cannot run with.
    pub fn validate(&self) -> IndexResult<()> {
        if self.parallel_threshold == 0 {
            return Err(IndexError::Config(
                "parallel_threshold must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON text.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_str(input: &str) -> IndexResult<Self> {
        let config: Self =
            serde_json::from_str(input).map_err(|e| IndexError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(IndexConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let config = IndexConfig {
            parallel_threshold: 0,
        };
        assert!(matches!(config.validate(), Err(IndexError::Config(_))));
    }

    #[test]
    fn test_from_json_defaults_missing_fields() {
        let config = IndexConfig::from_json_str("{}").unwrap();
        assert_eq!(config, IndexConfig::default());
    }

    #[test]
    fn test_from_json_overrides() {
        let config = IndexConfig::from_json_str(r#"{"parallel_threshold": 64}"#).unwrap();
        assert_eq!(config.parallel_threshold, 64);
    }

    #[test]
    fn test_from_json_malformed() {
        let result = IndexConfig::from_json_str("{not json");
        assert!(matches!(result, Err(IndexError::Serialization(_))));
    }
}
