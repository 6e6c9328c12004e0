//! Fixture discovery and temporary model files.

use hydronet::document::LoadOptions;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Root of the checked-in fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Every `.json` file under `fixtures/<group>`, sorted by path.
pub fn fixture_files(group: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(fixtures_dir().join(group))
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

pub fn fixture_path(group: &str, name: &str) -> PathBuf {
    fixtures_dir().join(group).join(name)
}

/// Parse a fixture file as raw JSON.
pub fn read_fixture(group: &str, name: &str) -> Value {
    let text = fs::read_to_string(fixture_path(group, name)).expect("Failed to read fixture");
    serde_json::from_str(&text).expect("Fixture is not valid JSON")
}

/// Options for loading checked-in fixtures, which may sit in a read-only
/// checkout.
pub fn fixture_options() -> LoadOptions {
    LoadOptions {
        check_write_permission: false,
        ..LoadOptions::default()
    }
}

/// Write `value` as `name` inside `dir` and return the path.
pub fn write_model(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    let text = serde_json::to_string_pretty(value).expect("Failed to serialise model");
    fs::write(&path, text).expect("Failed to write model");
    path
}

/// Copy a fixture and its sibling files into `dir`.
pub fn copy_fixture_group(group: &str, dir: &Path) {
    for entry in WalkDir::new(fixtures_dir().join(group))
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
    {
        fs::copy(entry.path(), dir.join(entry.file_name())).expect("Failed to copy fixture");
    }
}
