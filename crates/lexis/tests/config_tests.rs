//! Config loading tests

use std::io::Write;

use lexis::{config, Error, IndexConfig, SharedIndex};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_config(r#"{"parallel_threshold": 32}"#);
    let config = config::load(file.path()).unwrap();
    assert_eq!(config, IndexConfig { parallel_threshold: 32 });
}

#[test]
fn test_load_partial_file_uses_defaults() {
    let file = write_config("{}");
    let config = config::load(file.path()).unwrap();
    assert_eq!(config, IndexConfig::default());
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = config::load(dir.path().join("absent.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_load_or_default_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = config::load_or_default(dir.path().join("absent.json")).unwrap();
    assert_eq!(config, IndexConfig::default());
}

#[test]
fn test_load_rejects_invalid_config() {
    let file = write_config(r#"{"parallel_threshold": 0}"#);
    let result = config::load(file.path());
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_loaded_config_builds_index() {
    lexis::tracing::init_with_filter("debug");
    let file = write_config(r#"{"parallel_threshold": 1}"#);
    let index = SharedIndex::with_config(config::load(file.path()).unwrap()).unwrap();

    let smith = index.add_row(["Smith", "London"]).unwrap();
    let smyth = index.add_row(["Smyth", "Leeds"]).unwrap();
    assert_eq!(index.natural_language("smith", true), vec![smith, smyth]);
}

#[test]
fn test_index_error_converts() {
    let index = SharedIndex::new();
    let result: lexis::Result<_> = index.add_row(Vec::<String>::new()).map_err(Error::from);
    assert!(matches!(result, Err(Error::Index(_))));
}
