//! Tests for ImportService

use std::path::PathBuf;
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use officemates::application::services::ImportService;
use officemates::application::ApplicationError;
use officemates::domain::{DomainError, Node};
use officemates::infrastructure::traits::{NodeStore, RealFileSystem};
use officemates::infrastructure::{SqliteNodeStore, StoreError};
use officemates::util::testing;

const SCENARIO_JSON: &str = r#"[
    {"id": 1, "ParentId": null, "Name": "HQ", "Type": 0},
    {"id": 2, "ParentId": 1, "Name": "Office A", "Type": 1},
    {"id": 3, "ParentId": 2, "Name": "Alice", "Type": 3},
    {"id": 4, "ParentId": 2, "Name": "Bob", "Type": 3},
    {"id": 5, "ParentId": 1, "Name": "Office B", "Type": 1},
    {"id": 6, "ParentId": 5, "Name": "Carol", "Type": 3}
]"#;

fn setup() -> (Arc<SqliteNodeStore>, ImportService) {
    testing::init_test_setup();
    let store = Arc::new(SqliteNodeStore::in_memory().unwrap());
    store.ensure_schema().unwrap();
    let service = ImportService::new(Arc::new(RealFileSystem), store.clone());
    (store, service)
}

/// Helper to create a temp import file
fn create_data_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write data file");
    path
}

#[test]
fn given_valid_file_when_importing_then_inserts_every_record() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = create_data_file(&temp, "mock_data.json", SCENARIO_JSON);
    let (store, service) = setup();

    // Act
    let report = service.import_file(&path).unwrap();

    // Assert
    assert_eq!(report.inserted, 6);
    assert_eq!(report.source, path);
    assert_eq!(store.count().unwrap(), 6);
    assert_eq!(
        store.node(3).unwrap(),
        Some(Node::new(3, Some(2), "Alice", 3).unwrap())
    );
    assert_eq!(store.node(1).unwrap().unwrap().parent_id, None);
}

#[test]
fn given_extra_keys_when_parsing_then_ignores_them() {
    let (_, service) = setup();

    let nodes = service
        .parse(r#"[{"id": 1, "ParentId": null, "Name": "HQ", "Type": 0, "Floor": 12}]"#)
        .unwrap();

    assert_eq!(nodes, vec![Node::new(1, None, "HQ", 0).unwrap()]);
}

#[test]
fn given_empty_array_when_importing_then_inserts_nothing() {
    let temp = TempDir::new().unwrap();
    let path = create_data_file(&temp, "empty.json", "[]");
    let (store, service) = setup();

    let report = service.import_file(&path).unwrap();

    assert_eq!(report.inserted, 0);
    assert_eq!(store.count().unwrap(), 0);
}

#[rstest]
#[case::missing_parent_key(r#"[{"id": 1, "Name": "HQ", "Type": 0}]"#)]
#[case::missing_name(r#"[{"id": 1, "ParentId": null, "Type": 0}]"#)]
#[case::missing_type(r#"[{"id": 1, "ParentId": null, "Name": "HQ"}]"#)]
#[case::missing_id(r#"[{"ParentId": null, "Name": "HQ", "Type": 0}]"#)]
#[case::wrong_case_key(r#"[{"id": 1, "parentId": null, "Name": "HQ", "Type": 0}]"#)]
#[case::string_id(r#"[{"id": "1", "ParentId": null, "Name": "HQ", "Type": 0}]"#)]
#[case::not_an_array(r#"{"id": 1, "ParentId": null, "Name": "HQ", "Type": 0}"#)]
#[case::truncated(r#"[{"id": 1, "ParentId": null"#)]
fn given_malformed_json_when_parsing_then_parse_error(#[case] content: &str) {
    let (_, service) = setup();

    let err = service.parse(content).unwrap_err();

    assert!(
        matches!(err, ApplicationError::Parse { .. }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn given_blank_name_when_importing_then_nothing_is_inserted() {
    let temp = TempDir::new().unwrap();
    let path = create_data_file(
        &temp,
        "bad.json",
        r#"[
            {"id": 1, "ParentId": null, "Name": "HQ", "Type": 0},
            {"id": 2, "ParentId": 1, "Name": "  ", "Type": 1}
        ]"#,
    );
    let (store, service) = setup();

    let err = service.import_file(&path).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidNode { id: 2, .. })
    ));
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn given_duplicate_id_when_importing_then_whole_batch_rolls_back() {
    let temp = TempDir::new().unwrap();
    let path = create_data_file(
        &temp,
        "dup.json",
        r#"[
            {"id": 1, "ParentId": null, "Name": "HQ", "Type": 0},
            {"id": 2, "ParentId": 1, "Name": "Office A", "Type": 1},
            {"id": 2, "ParentId": 1, "Name": "Office A2", "Type": 1}
        ]"#,
    );
    let (store, service) = setup();

    let err = service.import_file(&path).unwrap_err();

    match err {
        ApplicationError::Store { source, .. } => {
            assert!(matches!(source, StoreError::Constraint { id: 2, .. }))
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn given_already_imported_file_when_importing_again_then_fails_and_keeps_first_batch() {
    let temp = TempDir::new().unwrap();
    let path = create_data_file(&temp, "mock_data.json", SCENARIO_JSON);
    let (store, service) = setup();
    service.import_file(&path).unwrap();

    let err = service.import_file(&path).unwrap_err();

    assert!(matches!(err, ApplicationError::Store { .. }));
    assert_eq!(store.count().unwrap(), 6);
}

#[test]
fn given_missing_file_when_importing_then_input_not_found() {
    let temp = TempDir::new().unwrap();
    let (_, service) = setup();

    let err = service
        .import_file(&temp.path().join("nope.json"))
        .unwrap_err();

    assert!(matches!(err, ApplicationError::InputNotFound(_)));
}
