use npmpack::config::{resolve, spread_entries, PackOptions, PackageJsonOverride};
use npmpack::errors::PackError;
use serde_json::json;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_resolve_applies_defaults() {
    let config = resolve(PackOptions::default()).unwrap();

    assert_eq!(config.root, PathBuf::from("."));
    assert!(config.copy.is_empty());
    assert!(config.include.is_empty());
    assert!(config.exclude.is_empty());
    assert_eq!(config.output, PathBuf::from("pkg"));
    assert!(config.packagejson.is_empty());
}

#[test]
fn test_resolve_is_idempotent() {
    let options = PackOptions {
        include: Some(vec!["src/**".to_string()]),
        packagejson: Some(PackageJsonOverride::from(r#"{"version":"1.0.0"}"#)),
        ..PackOptions::default()
    };

    let first = resolve(options.clone()).unwrap();
    let second = resolve(options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_arrays_replace_defaults() {
    let options = PackOptions {
        copy: Some(vec!["dist".to_string()]),
        exclude: Some(vec!["**/*.test.js".to_string()]),
        output: Some(PathBuf::from("out")),
        ..PackOptions::default()
    };

    let config = resolve(options).unwrap();
    assert_eq!(config.copy, vec!["dist".to_string()]);
    assert_eq!(config.exclude, vec!["**/*.test.js".to_string()]);
    assert_eq!(config.output, PathBuf::from("out"));
}

#[test]
fn test_packagejson_string_is_parsed() {
    let options = PackOptions {
        packagejson: Some(r#"{"name":"renamed","private":true}"#.into()),
        ..PackOptions::default()
    };

    let config = resolve(options).unwrap();
    assert_eq!(config.packagejson.get("name"), Some(&json!("renamed")));
    assert_eq!(config.packagejson.get("private"), Some(&json!(true)));
}

#[test]
fn test_packagejson_object_passes_through() {
    let options = PackOptions {
        packagejson: Some(json!({"version": "2.0.0"}).into()),
        ..PackOptions::default()
    };

    let config = resolve(options).unwrap();
    assert_eq!(json!(config.packagejson), json!({"version": "2.0.0"}));
}

#[test]
fn test_malformed_packagejson_is_config_error() {
    let options = PackOptions {
        packagejson: Some("{not json".into()),
        ..PackOptions::default()
    };

    let result = resolve(options);
    assert!(
        matches!(result, Err(PackError::ConfigError(_))),
        "Expected ConfigError, got {:?}",
        result
    );
}

#[test]
fn test_spread_of_non_objects() {
    assert_eq!(json!(spread_entries(json!(["a", "b"]))), json!({"0": "a", "1": "b"}));
    assert_eq!(json!(spread_entries(json!("{}"))), json!({"0": "{", "1": "}"}));
    assert!(spread_entries(json!(42)).is_empty());
    assert!(spread_entries(json!(null)).is_empty());
}

#[test]
fn test_options_from_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("npmpack.json");
    std::fs::write(
        &path,
        r#"{
  "root": "package",
  "files": ["dist"],
  "include": ["src/**/*.js"],
  "props": {"private": false}
}"#,
    )
    .unwrap();

    let options = PackOptions::from_file(&path).unwrap();
    assert_eq!(options.root, Some(PathBuf::from("package")));
    assert_eq!(options.copy, Some(vec!["dist".to_string()]));
    assert_eq!(options.include, Some(vec!["src/**/*.js".to_string()]));
    assert_eq!(options.output, None);
    assert_eq!(
        options.packagejson,
        Some(PackageJsonOverride::Value(json!({"private": false})))
    );
}

#[test]
fn test_config_file_packagejson_string() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("npmpack.json");
    std::fs::write(&path, r#"{"packagejson": "{\"version\":\"3.0.0\"}"}"#).unwrap();

    let config = resolve(PackOptions::from_file(&path).unwrap()).unwrap();
    assert_eq!(json!(config.packagejson), json!({"version": "3.0.0"}));
}

#[test]
fn test_config_file_rejects_unknown_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("npmpack.json");
    std::fs::write(&path, r#"{"outptu": "dist"}"#).unwrap();

    let result = PackOptions::from_file(&path);
    assert!(matches!(result, Err(PackError::ConfigError(_))));
}

#[test]
fn test_missing_config_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = PackOptions::from_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(PackError::IoError(_))));
}

#[test]
fn test_overlay_prefers_present_fields() {
    let file = PackOptions {
        root: Some(PathBuf::from("package")),
        include: Some(vec!["src/**".to_string()]),
        output: Some(PathBuf::from("dist")),
        ..PackOptions::default()
    };
    let cli = PackOptions {
        output: Some(PathBuf::from("out")),
        ..PackOptions::default()
    };

    let merged = file.overlay(cli);
    assert_eq!(merged.root, Some(PathBuf::from("package")));
    assert_eq!(merged.include, Some(vec!["src/**".to_string()]));
    assert_eq!(merged.output, Some(PathBuf::from("out")));
    assert_eq!(merged.copy, None);
}
