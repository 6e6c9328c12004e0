//! Include scanning during load and include edits.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::helpers::model_fixtures::{copy_fixture_group, write_model};
use hydronet::document::{DocumentModel, LoadError, LoadOptions};
use hydronet::imports::ComponentCategory;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn custom_components_are_found_next_to_the_model() {
    let temp_dir = TempDir::new().unwrap();
    copy_fixture_group("valid", temp_dir.path());

    let model =
        DocumentModel::open(temp_dir.path().join("basin.json"), &LoadOptions::default()).unwrap();
    assert_eq!(model.import_records().len(), 1);
    assert!(model.import_records()[0].parse_ok);
    assert_eq!(
        model.custom_components(),
        vec![
            (ComponentCategory::Parameter, "WorksLicence"),
            (ComponentCategory::Recorder, "SpillRecorder"),
        ]
    );
    assert!(
        model
            .references()
            .is_referenced_as_type(ComponentCategory::Parameter, "WorksLicence")
    );
    assert!(
        !model
            .references()
            .is_referenced_as_type(ComponentCategory::Recorder, "SpillRecorder")
    );
}

#[test]
fn missing_include_does_not_fail_the_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_model(
        temp_dir.path(),
        "model.json",
        &json!({"includes": ["not_there.py", "fragment.json"]}),
    );

    let model = DocumentModel::open(&path, &LoadOptions::default()).unwrap();
    assert_eq!(model.import_records().len(), 1);
    assert!(!model.import_records()[0].exists);
    assert!(model.custom_components().is_empty());
}

#[test]
fn builtin_name_collision_fails_the_load() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("custom.py"),
        "from pywr.parameters import Parameter\n\nclass FlowParameter(Parameter):\n    pass\n",
    )
    .unwrap();
    let path = write_model(temp_dir.path(), "model.json", &json!({"includes": ["custom.py"]}));

    let err = DocumentModel::open(&path, &LoadOptions::default()).unwrap_err();
    match &err {
        LoadError::NameCollision { category, class, .. } => {
            assert_eq!(*category, ComponentCategory::Parameter);
            assert_eq!(class, "FlowParameter");
        }
        other => panic!("expected a collision, got {other:?}"),
    }

    let options = LoadOptions {
        scan_includes: false,
        ..LoadOptions::default()
    };
    assert!(DocumentModel::open(&path, &options).is_ok());
}

#[test]
fn adding_an_include_rescans() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("weir.py"),
        "from pywr.nodes import Link\n\nclass Weir(Link):\n    pass\n",
    )
    .unwrap();
    let path = write_model(temp_dir.path(), "model.json", &json!({}));

    let mut model = DocumentModel::open(&path, &LoadOptions::default()).unwrap();
    assert!(model.custom_components().is_empty());

    assert_eq!(model.add_include("weir.py").len(), 1);
    assert_eq!(model.custom_components(), vec![(ComponentCategory::Node, "Weir")]);

    model.remove_include("weir.py");
    assert!(model.custom_components().is_empty());
    assert_eq!(model.log().entries().len(), 2);
}
