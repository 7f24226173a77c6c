//! Integration tests for drea-config

use drea_config::*;
use drea_url::{UrlConstraints, UrlValidator};
use drea_validation::{CustomModel, ExtendMode, Rule, Schema};
use serde_json::{Value, json};
use std::fs;

#[test]
fn test_settings_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drea.toml");
    fs::write(
        &path,
        "[validation]\nextend_mode = \"sequential\"\n\n[url]\nmin_passing_checks = 1\n",
    )
    .unwrap();

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.validation.extend_mode, ExtendMode::Sequential);
    assert_eq!(settings.url.min_passing_checks, 1);
}

#[test]
fn test_settings_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drea.json");
    fs::write(&path, r#"{"url": {"min_passing_checks": 3}}"#).unwrap();

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.url.min_passing_checks, 3);
    assert_eq!(settings.validation.extend_mode, ExtendMode::Atomic);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Settings::from_file(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::IoError(_))));
}

#[test]
fn test_settings_drive_url_policy() {
    let settings = Settings::parse(r#"{"url": {"min_passing_checks": 1}}"#, FileFormat::Json).unwrap();
    let constraints = UrlConstraints::new().allowed_protocols(["https"]);

    assert!(!UrlValidator::new("https://example.com").verify_pattern(&constraints));
    assert!(
        UrlValidator::new("https://example.com")
            .with_policy(settings.url)
            .verify_pattern(&constraints)
    );
}

#[test]
fn test_settings_drive_extend_mode() {
    let settings = Settings::parse(
        "[validation]\nextend_mode = \"sequential\"",
        FileFormat::Toml,
    )
    .unwrap();

    let schema = Schema::new().field("name", Rule::predicate(Value::is_string, "name"));
    let mut model = CustomModel::with_options(schema, settings.validation).unwrap();

    let extra = Schema::new()
        .field("age", Rule::predicate(Value::is_number, "age"))
        .field("name", Rule::skip("dup"));
    assert!(model.extend(extra).is_err());
    assert!(model.schema().contains_key("age"));
    assert!(model.validate(&json!({ "name": "x", "age": 3 })).unwrap().is_valid());
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::ParseError("bad key".to_string());
    assert!(err.to_string().contains("bad key"));
}
