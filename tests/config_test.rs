//! Integration tests for Settings config loading.
//!
//! These tests run without a global config (temp directories only),
//! so they test explicit config files layered over compiled defaults.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use officemates::application::ApplicationError;
use officemates::config::Settings;

#[test]
fn given_config_file_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("officemates.toml");
    fs::write(
        &path,
        r#"
[database]
path = "/tmp/offices.db"

[import]
data_file = "/data/org.json"

[node_types]
office = 4
employee = 9
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(&path)).expect("load settings");

    // Assert
    assert_eq!(settings.database.path, PathBuf::from("/tmp/offices.db"));
    assert_eq!(settings.import.data_file, PathBuf::from("/data/org.json"));
    assert_eq!(settings.node_types.office, 4);
    assert_eq!(settings.node_types.employee, 9);
}

#[test]
fn given_partial_config_file_when_load_then_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("officemates.toml");
    fs::write(&path, "[node_types]\nemployee = 5\n").unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.node_types.employee, 5);
    assert_eq!(settings.node_types.office, 1);
}

#[test]
fn given_memory_database_when_load_then_path_is_not_expanded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("officemates.toml");
    fs::write(&path, "[database]\npath = \":memory:\"\n").unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert!(settings.database.is_in_memory());
}

#[test]
fn given_tilde_path_when_load_then_expands_home() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("officemates.toml");
    fs::write(&path, "[import]\ndata_file = \"~/org.json\"\n").unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert!(!settings.import.data_file.starts_with("~"));
    assert!(settings.import.data_file.ends_with("org.json"));
}

#[test]
fn given_missing_config_file_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();

    let err = Settings::load(Some(&dir.path().join("absent.toml"))).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("officemates.toml");
    fs::write(&path, "[node_types\noffice = ").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_cli_overrides_when_applied_then_win_over_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("officemates.toml");
    fs::write(&path, "[database]\npath = \"/tmp/from-file.db\"\n").unwrap();

    let settings = Settings::load(Some(&path))
        .unwrap()
        .with_overrides(Some(&PathBuf::from(":memory:")), None);

    assert!(settings.database.is_in_memory());
    assert_eq!(settings.import.data_file, PathBuf::from("mock_data.json"));
}
