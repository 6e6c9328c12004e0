//! Session load cycle.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::helpers::model_fixtures::write_model;
use hydronet::document::{DocumentModel, LoadError};
use hydronet::project::{Session, SessionState};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn new_session_is_unloaded() {
    let session = Session::new();
    assert!(matches!(session.state(), SessionState::Unloaded));
    assert!(session.model().is_none());
    assert!(session.error().is_none());
    assert!(!session.is_dirty());
}

#[test]
fn open_valid_then_invalid() {
    let temp_dir = TempDir::new().unwrap();
    let good = write_model(
        temp_dir.path(),
        "good.json",
        &json!({"nodes": [{"name": "a", "type": "input"}]}),
    );
    let bad = write_model(
        temp_dir.path(),
        "bad.json",
        &json!({"nodes": [{"name": "a", "type": "input"}], "edges": [["a", "b"]]}),
    );

    let mut session = Session::new();
    assert!(session.open(&good));
    assert!(session.model().unwrap().nodes().exists("a"));

    session
        .model_mut()
        .unwrap()
        .nodes_mut()
        .add("b", json!({"type": "output"}))
        .unwrap();
    assert!(session.is_dirty());

    assert!(!session.open(&bad));
    assert!(session.model().is_none());
    assert!(session.model_mut().is_none());
    let err = session.error().unwrap();
    assert!(matches!(err, LoadError::Schema(_)));
    assert_eq!(
        err.to_string(),
        "The node 'b' in the edge at position 1 does not exist"
    );

    assert!(session.open(&good));
    assert!(session.error().is_none());
    assert!(!session.is_dirty());
}

#[test]
fn close_discards_the_document() {
    let mut session = Session::with_model(DocumentModel::new());
    assert!(session.is_valid());
    session.close();
    assert!(matches!(session.state(), SessionState::Unloaded));
}
