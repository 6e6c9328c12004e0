//! Raw access to top-level sections of a document root.

use crate::base::constants::NAME;
use serde_json::{Map, Value};

/// Items of a list-shaped section; empty when missing or not a list.
pub(crate) fn list<'a>(root: &'a Value, key: &str) -> &'a [Value] {
    root.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Entries of a map-shaped section.
pub(crate) fn map<'a>(root: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    root.get(key).and_then(Value::as_object)
}

/// Mutable list section, created empty when missing.
pub(crate) fn list_mut<'a>(root: &'a mut Value, key: &str) -> Option<&'a mut Vec<Value>> {
    root.as_object_mut()?
        .entry(key)
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
}

/// Mutable map section, created empty when missing.
pub(crate) fn map_mut<'a>(root: &'a mut Value, key: &str) -> Option<&'a mut Map<String, Value>> {
    root.as_object_mut()?
        .entry(key)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
}

/// The `name` field of a list entity.
pub(crate) fn name_of(entity: &Value) -> Option<&str> {
    entity.get(NAME).and_then(Value::as_str)
}

/// The `type` field of an entity.
pub(crate) fn type_of(entity: &Value) -> Option<&str> {
    entity.get(crate::base::constants::TYPE).and_then(Value::as_str)
}

/// A copy of `map` with `old` renamed to `new`, keeping its position.
pub(crate) fn rename_key(map: &Map<String, Value>, old: &str, new: &str) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| {
            let key = if key == old { new.to_string() } else { key.clone() };
            (key, value.clone())
        })
        .collect()
}
