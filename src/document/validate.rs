//! Load-time checks on a parsed document root.

use super::error::LoadError;
use crate::base::constants::{
    EDGES, NAME, NODES, PARAMETERS, RECORDERS, SCENARIOS, SECTIONS, SectionShape, TYPE,
};
use crate::imports::{ImportRecord, is_builtin_key};
use rustc_hash::FxHashSet;
use serde_json::{Map, Value};
use std::path::Path;

/// Fill in every missing top-level section with an empty container.
pub(crate) fn backfill(root: &mut Map<String, Value>) {
    for (key, shape) in SECTIONS {
        if !root.contains_key(*key) {
            let empty = match shape {
                SectionShape::Map => Value::Object(Map::new()),
                SectionShape::List => Value::Array(Vec::new()),
            };
            root.insert(key.to_string(), empty);
        }
    }
}

/// Check the structure of a backfilled root. Returns the first problem.
pub(crate) fn validate(root: &Map<String, Value>) -> Result<(), LoadError> {
    check_sections(root)?;
    let nodes = check_nodes(root)?;
    check_edges(root, &nodes)?;
    check_components(root, PARAMETERS, "parameter")?;
    check_components(root, RECORDERS, "recorder")?;
    check_scenarios(root)
}

/// Reject custom classes registering under a built-in key.
pub(crate) fn check_collisions<'r>(
    records: impl IntoIterator<Item = &'r ImportRecord>,
) -> Result<(), LoadError> {
    for record in records {
        for (category, class) in record.components() {
            if is_builtin_key(category, &category.key_of(class)) {
                return Err(LoadError::NameCollision {
                    category,
                    class: class.to_string(),
                    file: record
                        .path
                        .as_deref()
                        .unwrap_or(Path::new(""))
                        .to_path_buf(),
                });
            }
        }
    }
    Ok(())
}

fn shape_name(shape: SectionShape) -> &'static str {
    match shape {
        SectionShape::Map => "mapping",
        SectionShape::List => "list",
    }
}

fn check_sections(root: &Map<String, Value>) -> Result<(), LoadError> {
    for (key, shape) in SECTIONS {
        let Some(value) = root.get(*key) else {
            continue;
        };
        let ok = match shape {
            SectionShape::Map => value.is_object(),
            SectionShape::List => value.is_array(),
        };
        if !ok {
            return Err(LoadError::schema(format!(
                "The '{key}' section must be a {}",
                shape_name(*shape)
            )));
        }
    }
    Ok(())
}

fn section_list<'a>(root: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    root.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn non_empty_str<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn check_nodes(root: &Map<String, Value>) -> Result<FxHashSet<&str>, LoadError> {
    let mut names = FxHashSet::default();
    for (index, node) in section_list(root, NODES).iter().enumerate() {
        let position = index + 1;
        if !node.is_object() {
            return Err(LoadError::schema(format!(
                "The node at position {position} must be a mapping"
            )));
        }
        let Some(name) = non_empty_str(node, NAME) else {
            return Err(LoadError::schema(format!(
                "The node at position {position} is missing a valid 'name' key"
            )));
        };
        if non_empty_str(node, TYPE).is_none() {
            return Err(LoadError::schema(format!(
                "The node '{name}' is missing a valid 'type' key"
            )));
        }
        if !names.insert(name) {
            return Err(LoadError::schema(format!(
                "The node name '{name}' is used by more than one node"
            )));
        }
    }
    Ok(names)
}

fn check_edges(root: &Map<String, Value>, nodes: &FxHashSet<&str>) -> Result<(), LoadError> {
    for (index, edge) in section_list(root, EDGES).iter().enumerate() {
        let position = index + 1;
        let Some(items) = edge.as_array().filter(|items| (2..=4).contains(&items.len())) else {
            return Err(LoadError::schema(format!(
                "The edge at position {position} must be a list of 2 to 4 items"
            )));
        };
        for endpoint in &items[..2] {
            let Some(name) = endpoint.as_str() else {
                return Err(LoadError::schema(format!(
                    "The edge at position {position} must start with two node names"
                )));
            };
            if !nodes.contains(name) {
                return Err(LoadError::schema(format!(
                    "The node '{name}' in the edge at position {position} does not exist"
                )));
            }
        }
        for slot in &items[2..] {
            if !(slot.is_null() || slot.is_string() || slot.is_i64() || slot.is_u64()) {
                return Err(LoadError::schema(format!(
                    "The edge at position {position} has an invalid slot {slot}"
                )));
            }
        }
    }
    Ok(())
}

fn check_components(
    root: &Map<String, Value>,
    section: &str,
    label: &str,
) -> Result<(), LoadError> {
    let Some(components) = root.get(section).and_then(Value::as_object) else {
        return Ok(());
    };
    for (name, component) in components {
        let Some(fields) = component.as_object() else {
            return Err(LoadError::schema(format!(
                "The {label} '{name}' must be a mapping"
            )));
        };
        if !fields.is_empty() && non_empty_str(component, TYPE).is_none() {
            return Err(LoadError::schema(format!(
                "The {label} '{name}' is missing a valid 'type' key"
            )));
        }
    }
    Ok(())
}

fn check_scenarios(root: &Map<String, Value>) -> Result<(), LoadError> {
    for (index, scenario) in section_list(root, SCENARIOS).iter().enumerate() {
        if non_empty_str(scenario, NAME).is_none() {
            return Err(LoadError::schema(format!(
                "The scenario at position {} is missing a valid 'name' key",
                index + 1
            )));
        }
    }
    Ok(())
}

