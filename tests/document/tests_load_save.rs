//! Loading from and saving to disk.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::helpers::model_fixtures::write_model;
use hydronet::document::{DocumentModel, LoadError, LoadOptions, SaveError};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn simple_model() -> serde_json::Value {
    json!({
        "metadata": {"title": "Test", "description": "", "minimum_version": "1.20"},
        "nodes": [
            {"name": "in", "type": "input", "max_flow": "cap"},
            {"name": "out", "type": "output"}
        ],
        "edges": [["in", "out"]],
        "parameters": {"cap": {"type": "constant", "value": 10}}
    })
}

// =============================================================================
// LOAD
// =============================================================================

#[test]
fn missing_file_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.json");
    let err = DocumentModel::open(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::NotFound(p) if p == path));
}

#[test]
fn read_only_file_is_rejected_when_checked() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_model(temp_dir.path(), "model.json", &simple_model());
    let mut permissions = fs::metadata(&path).unwrap().permissions();
    permissions.set_readonly(true);
    fs::set_permissions(&path, permissions).unwrap();

    let err = DocumentModel::open(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::ReadOnly(_)));
    assert!(err.to_string().ends_with("is read-only"));

    let options = LoadOptions {
        check_write_permission: false,
        ..LoadOptions::default()
    };
    assert!(DocumentModel::open(&path, &options).is_ok());

    let mut permissions = fs::metadata(&path).unwrap().permissions();
    #[allow(clippy::permissions_set_readonly_false)]
    permissions.set_readonly(false);
    fs::set_permissions(&path, permissions).unwrap();
}

#[test]
fn malformed_file_reports_position() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{\n  \"nodes\": [\n    {\"name\": \"a\",}\n  ]\n}").unwrap();

    match DocumentModel::open(&path, &LoadOptions::default()) {
        Err(LoadError::Parse { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn non_object_root_is_a_schema_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_model(temp_dir.path(), "list.json", &json!([1, 2]));
    assert!(matches!(
        DocumentModel::open(&path, &LoadOptions::default()),
        Err(LoadError::Schema(_))
    ));
}

// =============================================================================
// SAVE
// =============================================================================

#[test]
fn save_round_trip_keeps_edits_and_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_model(temp_dir.path(), "model.json", &simple_model());

    let mut model = DocumentModel::open(&path, &LoadOptions::default()).unwrap();
    model.parameters_mut().rename("cap", "capacity").unwrap();
    assert!(model.is_dirty());
    model.save().unwrap();
    assert!(!model.is_dirty());
    assert!(model.has_changes());

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n  \"metadata\": {\n    \"title\": \"Test\""));

    let reloaded = DocumentModel::open(&path, &LoadOptions::default()).unwrap();
    assert_eq!(reloaded.root(), model.root());
    assert_eq!(reloaded.root()["nodes"][0]["max_flow"], "capacity");
    assert!(!reloaded.has_changes());
}

#[test]
fn save_as_moves_the_document() {
    let temp_dir = TempDir::new().unwrap();
    let mut model = DocumentModel::from_value(simple_model()).unwrap();
    model
        .nodes_mut()
        .add("link", json!({"type": "link"}))
        .unwrap();

    let target = temp_dir.path().join("copy.json");
    model.save_as(&target).unwrap();
    assert_eq!(model.path(), Some(target.as_path()));
    assert!(!model.is_dirty());

    let reloaded = DocumentModel::open(&target, &LoadOptions::default()).unwrap();
    assert!(reloaded.nodes().exists("link"));
}

#[test]
fn failed_save_leaves_model_dirty() {
    let temp_dir = TempDir::new().unwrap();
    let mut model = DocumentModel::from_value(simple_model()).unwrap();
    model.nodes_mut().delete("out");

    let target = temp_dir.path().join("missing_dir").join("model.json");
    let err = model.save_as(&target).unwrap_err();
    assert!(matches!(err, SaveError::Io { .. }));
    assert!(model.is_dirty());
    assert!(model.path().is_none());
}
