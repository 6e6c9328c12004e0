//! Editor-only schematic shapes (`editor.shapes`).
//!
//! Shapes are annotations drawn on the schematic: text boxes, rectangles
//! and lines. They are identified by a string `id` and never referenced by
//! engine data, so they take part in no cascade.

use super::changes::{Change, ChangeLog, ChangeSet};
use super::error::ValidationError;
use crate::base::constants::{EDITOR, SHAPES, TYPE};
use serde_json::{Map, Value};

const ID: &str = "id";
const LABEL: &str = "shape";

fn shapes(root: &Value) -> &[Value] {
    root.get(EDITOR)
        .and_then(|editor| editor.get(SHAPES))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn shapes_mut(root: &mut Value) -> Option<&mut Vec<Value>> {
    root.as_object_mut()?
        .entry(EDITOR)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()?
        .entry(SHAPES)
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
}

fn id_of(shape: &Value) -> Option<&str> {
    shape.get(ID).and_then(Value::as_str)
}

fn validate(shape: &Value) -> Result<(), ValidationError> {
    let fields = shape
        .as_object()
        .ok_or_else(|| ValidationError::invalid(LABEL, "expected a mapping"))?;
    for field in [ID, TYPE] {
        if !fields
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty())
        {
            return Err(ValidationError::missing(LABEL, field));
        }
    }
    Ok(())
}

/// Read access to schematic shapes.
#[derive(Clone, Copy)]
pub struct Shapes<'a> {
    root: &'a Value,
}

impl<'a> Shapes<'a> {
    pub(crate) fn new(root: &'a Value) -> Self {
        Self { root }
    }

    pub fn list_all(&self) -> &'a [Value] {
        shapes(self.root)
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.list_all().iter().filter_map(id_of).collect()
    }

    pub fn get(&self, id: &str) -> Option<&'a Value> {
        self.list_all().iter().find(|shape| id_of(shape) == Some(id))
    }

    pub fn exists(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

/// Write access to schematic shapes.
pub struct ShapesMut<'a> {
    root: &'a mut Value,
    log: &'a mut ChangeLog,
}

impl<'a> ShapesMut<'a> {
    pub(crate) fn new(root: &'a mut Value, log: &'a mut ChangeLog) -> Self {
        Self { root, log }
    }

    pub fn view(&self) -> Shapes<'_> {
        Shapes::new(self.root)
    }

    /// Add a shape. It needs a string `id` and `type`.
    pub fn add(&mut self, shape: Value) -> Result<ChangeSet, ValidationError> {
        validate(&shape)?;
        let id = id_of(&shape).unwrap_or_default().to_string();
        if self.view().exists(&id) {
            return Err(ValidationError::duplicate(LABEL, id));
        }
        if let Some(items) = shapes_mut(self.root) {
            items.push(shape);
        }
        Ok(self.commit(Change::Added {
            section: SHAPES,
            name: id,
        }))
    }

    /// Replace the shape with the same `id`, or add it.
    pub fn update(&mut self, shape: Value) -> Result<ChangeSet, ValidationError> {
        validate(&shape)?;
        let id = id_of(&shape).unwrap_or_default().to_string();
        let Some(items) = shapes_mut(self.root) else {
            return Ok(ChangeSet::new());
        };
        match items.iter_mut().find(|s| id_of(s) == Some(id.as_str())) {
            Some(existing) if *existing == shape => Ok(ChangeSet::new()),
            Some(existing) => {
                *existing = shape;
                Ok(self.commit(Change::Updated {
                    section: SHAPES,
                    name: id,
                }))
            }
            None => {
                items.push(shape);
                Ok(self.commit(Change::Added {
                    section: SHAPES,
                    name: id,
                }))
            }
        }
    }

    pub fn delete(&mut self, id: &str) -> ChangeSet {
        let Some(items) = shapes_mut(self.root) else {
            return ChangeSet::new();
        };
        let Some(index) = items.iter().position(|s| id_of(s) == Some(id)) else {
            return ChangeSet::new();
        };
        items.remove(index);
        self.commit(Change::Deleted {
            section: SHAPES,
            name: id.to_string(),
        })
    }

    fn commit(&mut self, change: Change) -> ChangeSet {
        let changes = ChangeSet::from(change);
        self.log.record(&changes);
        changes
    }
}
