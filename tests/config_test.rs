//! Integration tests for layered Settings loading.
//!
//! These tests pass the config files explicitly (temp directories only),
//! so the user's global config never leaks in.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use outliner::application::ApplicationError;
use outliner::config::Settings;

#[test]
fn given_explicit_file_when_load_then_overrides_defaults() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("outliner.toml");
    fs::write(
        &path,
        r#"
default_document = "work"
pretty_json = false

[tree]
show_ids = true
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load_from(None, Some(&path)).expect("load settings");

    // Assert
    assert_eq!(settings.default_document, "work");
    assert!(!settings.pretty_json);
    assert!(settings.tree.show_ids);
    // untouched keys keep their defaults
    assert_eq!(settings.tree.collapsed_marker, "…");
}

#[test]
fn given_global_and_explicit_file_when_load_then_explicit_wins() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let global = temp.path().join("global.toml");
    let explicit = temp.path().join("explicit.toml");
    fs::write(&global, "default_document = \"global\"\npretty_json = false\n").unwrap();
    fs::write(&explicit, "default_document = \"explicit\"\n").unwrap();

    // Act
    let settings = Settings::load_from(Some(&global), Some(&explicit)).unwrap();

    // Assert
    assert_eq!(settings.default_document, "explicit");
    assert!(!settings.pretty_json);
}

#[test]
fn given_data_dir_with_tilde_when_load_then_expanded() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("outliner.toml");
    fs::write(&path, "data_dir = \"~/outlines\"\n").unwrap();

    // Act
    let settings = Settings::load_from(None, Some(&path)).unwrap();

    // Assert
    assert!(!settings.data_dir.to_string_lossy().starts_with('~'));
    assert!(settings.data_dir.ends_with("outlines"));
}

#[test]
fn given_missing_explicit_file_when_load_then_config_error() {
    // Arrange
    let missing = PathBuf::from("/nonexistent/outliner.toml");

    // Act
    let result = Settings::load_from(None, Some(&missing));

    // Assert
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_empty_default_document_when_load_then_config_error() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("outliner.toml");
    fs::write(&path, "default_document = \"\"\n").unwrap();

    // Act
    let result = Settings::load_from(None, Some(&path));

    // Assert
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}
