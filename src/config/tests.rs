//! Tests for query settings loading

use std::io::Write;

use tempfile::{NamedTempFile, TempDir};

use super::*;
use crate::core::types::SortDirection;

fn settings_file(extension: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(extension)
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_default_settings() {
    let settings = QuerySettings::default();
    assert_eq!(settings.default_top_k, 100);
    assert_eq!(settings.default_sort_attribute, "id");
    assert_eq!(settings.default_sort_direction, SortDirection::Asc);
    assert_eq!(settings.search_text_attribute, "id");
    assert!(settings.include_all_attributes);
    assert!(settings.validate().is_ok());
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let settings = QuerySettings::load_with_prefix(&path, "VECDB_TEST_MISSING").unwrap();
    assert_eq!(settings, QuerySettings::default());
}

#[test]
fn test_load_toml_file() {
    let file = settings_file(
        ".toml",
        r#"
default_top_k = 1000
default_sort_attribute = "created_at"
default_sort_direction = "desc"
"#,
    );
    let settings = QuerySettings::load_with_prefix(file.path(), "VECDB_TEST_TOML").unwrap();

    assert_eq!(settings.default_top_k, 1000);
    assert_eq!(settings.default_sort_attribute, "created_at");
    assert_eq!(settings.default_sort_direction, SortDirection::Desc);
    // Unset keys keep their defaults
    assert_eq!(settings.search_text_attribute, "id");
    assert!(settings.include_all_attributes);
}

#[test]
fn test_load_json_file() {
    let file = settings_file(
        ".json",
        r#"{"search_text_attribute": "title", "include_all_attributes": false}"#,
    );
    let settings = QuerySettings::load_with_prefix(file.path(), "VECDB_TEST_JSON").unwrap();

    assert_eq!(settings.search_text_attribute, "title");
    assert!(!settings.include_all_attributes);
    assert_eq!(settings.default_top_k, 100);
}

#[test]
fn test_environment_overrides_file() {
    let file = settings_file(".toml", "default_top_k = 10\n");
    std::env::set_var("VECDB_TEST_ENV_DEFAULT_TOP_K", "250");

    let settings = QuerySettings::load_with_prefix(file.path(), "VECDB_TEST_ENV").unwrap();
    std::env::remove_var("VECDB_TEST_ENV_DEFAULT_TOP_K");

    assert_eq!(settings.default_top_k, 250);
}

#[test]
fn test_zero_top_k_rejected() {
    let file = settings_file(".toml", "default_top_k = 0\n");
    let err = QuerySettings::load_with_prefix(file.path(), "VECDB_TEST_ZERO").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
}

#[test]
fn test_malformed_file_rejected() {
    let file = settings_file(".toml", "default_top_k = \"many\"\n");
    let err = QuerySettings::load_with_prefix(file.path(), "VECDB_TEST_BAD").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

#[test]
fn test_validate_blank_attributes() {
    let settings = QuerySettings::default().with_default_sort("  ", SortDirection::Asc);
    assert!(settings.validate().is_err());

    let settings = QuerySettings::default().with_search_text_attribute("");
    assert!(settings.validate().is_err());
}

#[test]
fn test_builder_methods() {
    let settings = QuerySettings::default()
        .with_default_top_k(42)
        .with_default_sort("score", SortDirection::Desc)
        .with_search_text_attribute("name");

    assert_eq!(settings.default_top_k, 42);
    assert_eq!(settings.default_sort_attribute, "score");
    assert_eq!(settings.default_sort_direction, SortDirection::Desc);
    assert_eq!(settings.search_text_attribute, "name");
}

#[test]
fn test_default_settings_path() {
    let path = default_settings_path();
    assert!(path.ends_with("vecdb-explorer/query.toml"));
}
