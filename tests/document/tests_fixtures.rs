//! Every checked-in fixture loads, or fails with the message it declares.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::helpers::model_fixtures::{fixture_files, fixture_options};
use hydronet::document::{DocumentModel, LoadError};
use std::fs;

#[test]
fn valid_fixtures_load() {
    let files = fixture_files("valid");
    assert!(!files.is_empty(), "no valid fixtures found");
    for path in files {
        if let Err(err) = DocumentModel::open(&path, &fixture_options()) {
            panic!("{} failed to load: {err}", path.display());
        }
    }
}

#[test]
fn invalid_fixtures_fail_with_their_message() {
    let files = fixture_files("invalid");
    assert!(!files.is_empty(), "no invalid fixtures found");
    for path in files {
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let expected = raw["_expected_error"]
            .as_str()
            .expect("invalid fixture must declare _expected_error");

        match DocumentModel::open(&path, &fixture_options()) {
            Err(LoadError::Schema(message)) => {
                assert_eq!(message, expected, "{}", path.display());
            }
            other => panic!("{}: expected a schema error, got {other:?}", path.display()),
        }
    }
}

#[test]
fn basin_fixture_queries() {
    let path = crate::helpers::model_fixtures::fixture_path("valid", "basin.json");
    let model = DocumentModel::open(path, &fixture_options()).unwrap();

    assert_eq!(model.metadata().unwrap().title, "Upper Basin");
    assert_eq!(model.nodes().len(), 6);
    assert_eq!(model.edges().count(), 4);
    assert_eq!(model.nodes().orphans(), None);
    assert_eq!(model.parameters().is_used("curve"), 1);
    assert_eq!(model.tables().is_used("flows"), 1);
    assert_eq!(model.scenarios().is_used("climate"), 1);
    assert_eq!(model.scenarios().combinations(), Some(2));
    assert_eq!(
        model.recorders().orphans(),
        Some(vec!["town_deficit".to_string(), "storage_rec".to_string()])
    );
}
