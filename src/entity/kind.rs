//! Per-section behaviour of the generic entity collection.

use super::changes::ChangeSet;
use super::edges::{Edges, delete_node_edges, rename_node_in_edges};
use super::error::ValidationError;
use super::references::RefScope;
use super::section::type_of;
use crate::base::constants::{
    COLOR, COMPONENT_RENAME_EXCLUDED_KEYS, NAME, NODE_EDITOR_POSITION_FIELDS, NODE_REFERENCE_KEYS,
    NODES, PARAMETERS, POSITION, RECORDERS, SCENARIO_REFERENCE_KEY, SCENARIOS, SectionShape,
    TABLE_REFERENCE_KEY, TABLES, TYPE, VIRTUAL_NODE_TYPES,
};
use crate::imports::ComponentCategory;
use crate::tree::ReplaceOptions;
use serde_json::{Map, Value};

/// How `is_used` searches for references to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageScope {
    /// Any string in the document equal to the name.
    Anywhere,
    /// Strings held under one mapping key.
    Key(&'static str),
}

impl UsageScope {
    pub fn as_ref_scope(self) -> RefScope<'static> {
        match self {
            UsageScope::Anywhere => RefScope::Any,
            UsageScope::Key(key) => RefScope::Key(key),
        }
    }
}

/// Which strings `rename` rewrites outside the entity itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameScope {
    /// Only strings under these keys.
    Keys(&'static [&'static str]),
    /// Every string except those under these keys.
    AllExcept(&'static [&'static str]),
}

impl RenameScope {
    pub fn options(self) -> ReplaceOptions {
        match self {
            RenameScope::Keys(keys) => ReplaceOptions::new().match_keys(keys),
            RenameScope::AllExcept(keys) => ReplaceOptions::new().exclude_keys(keys),
        }
    }
}

/// Behaviour of one kind of named entity.
///
/// Implemented by zero-sized marker types; the collection code in
/// [`Entities`](super::Entities) is shared by every kind.
pub trait EntityKind {
    /// Top-level document key holding the entities.
    const SECTION: &'static str;
    /// Whether entities are keyed by name (`Map`) or carry a `name` (`List`).
    const SHAPE: SectionShape;
    /// Singular noun used in messages.
    const LABEL: &'static str;
    /// Category used to normalise `type` strings, if any.
    const CATEGORY: Option<ComponentCategory> = None;

    fn usage_scope() -> UsageScope;

    fn rename_scope() -> RenameScope;

    /// Check an entity before it is written. `name` is its identity.
    fn validate(name: &str, entity: &Value) -> Result<(), ValidationError>;

    fn is_virtual(_entity: &Value) -> bool {
        false
    }

    /// Carry data from the stored entity into its replacement.
    fn merge_on_update(_old: &Value, _new: &mut Value) {}

    /// Whether an entity with `usages` references counts as unused.
    fn is_orphan(_root: &Value, _name: &str, entity: &Value, usages: usize) -> bool {
        !Self::is_virtual(entity) && usages == 0
    }

    /// Extra changes after the entity was removed.
    fn on_delete(_root: &mut Value, _name: &str) -> ChangeSet {
        ChangeSet::new()
    }

    /// Extra changes after the entity and its references were renamed.
    fn on_rename(_root: &mut Value, _old: &str, _new: &str) -> ChangeSet {
        ChangeSet::new()
    }
}

fn require_object<'v>(
    kind: &'static str,
    entity: &'v Value,
) -> Result<&'v Map<String, Value>, ValidationError> {
    entity
        .as_object()
        .ok_or_else(|| ValidationError::invalid(kind, "expected a mapping"))
}

fn require_string(
    kind: &'static str,
    entity: &Map<String, Value>,
    field: &'static str,
) -> Result<(), ValidationError> {
    match entity.get(field).and_then(Value::as_str) {
        Some(value) if !value.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::missing(kind, field)),
    }
}

// ============================================================================
// NODES
// ============================================================================

/// Entries of the `nodes` list.
#[derive(Debug, Clone, Copy)]
pub struct NodeKind;

impl EntityKind for NodeKind {
    const SECTION: &'static str = NODES;
    const SHAPE: SectionShape = SectionShape::List;
    const LABEL: &'static str = "node";
    const CATEGORY: Option<ComponentCategory> = Some(ComponentCategory::Node);

    fn usage_scope() -> UsageScope {
        UsageScope::Anywhere
    }

    fn rename_scope() -> RenameScope {
        RenameScope::Keys(NODE_REFERENCE_KEYS)
    }

    fn validate(_name: &str, entity: &Value) -> Result<(), ValidationError> {
        let entity = require_object(Self::LABEL, entity)?;
        require_string(Self::LABEL, entity, NAME)?;
        require_string(Self::LABEL, entity, TYPE)
    }

    fn is_virtual(entity: &Value) -> bool {
        type_of(entity).is_some_and(|t| {
            let t = t.to_lowercase();
            VIRTUAL_NODE_TYPES.contains(&t.as_str())
        })
    }

    fn merge_on_update(old: &Value, new: &mut Value) {
        let Some(new) = new.as_object_mut() else {
            return;
        };

        if let Some(color) = old.get(COLOR) {
            if !new.contains_key(COLOR) {
                new.insert(COLOR.to_string(), color.clone());
            }
        }

        let Some(old_position) = old.get(POSITION).and_then(Value::as_object) else {
            return;
        };
        let carried: Vec<(&String, &Value)> = old_position
            .iter()
            .filter(|(key, _)| NODE_EDITOR_POSITION_FIELDS.contains(&key.as_str()))
            .collect();
        if carried.is_empty() {
            return;
        }
        let position = new
            .entry(POSITION)
            .or_insert_with(|| Value::Object(Map::new()));
        if let Some(position) = position.as_object_mut() {
            for (key, value) in carried {
                if !position.contains_key(key) {
                    position.insert(key.clone(), value.clone());
                }
            }
        }
    }

    fn is_orphan(root: &Value, name: &str, entity: &Value, _usages: usize) -> bool {
        !Self::is_virtual(entity) && !Edges::new(root).is_connected(name)
    }

    fn on_delete(root: &mut Value, name: &str) -> ChangeSet {
        delete_node_edges(root, name)
    }

    fn on_rename(root: &mut Value, old: &str, new: &str) -> ChangeSet {
        rename_node_in_edges(root, old, new)
    }
}

// ============================================================================
// COMPONENTS
// ============================================================================

fn validate_component(kind: &'static str, entity: &Value) -> Result<(), ValidationError> {
    let entity = require_object(kind, entity)?;
    if entity.is_empty() {
        return Ok(());
    }
    require_string(kind, entity, TYPE)
}

/// Entries of the `parameters` mapping.
#[derive(Debug, Clone, Copy)]
pub struct ParameterKind;

impl EntityKind for ParameterKind {
    const SECTION: &'static str = PARAMETERS;
    const SHAPE: SectionShape = SectionShape::Map;
    const LABEL: &'static str = "parameter";
    const CATEGORY: Option<ComponentCategory> = Some(ComponentCategory::Parameter);

    fn usage_scope() -> UsageScope {
        UsageScope::Anywhere
    }

    fn rename_scope() -> RenameScope {
        RenameScope::AllExcept(COMPONENT_RENAME_EXCLUDED_KEYS)
    }

    fn validate(_name: &str, entity: &Value) -> Result<(), ValidationError> {
        validate_component(Self::LABEL, entity)
    }
}

/// Entries of the `recorders` mapping.
#[derive(Debug, Clone, Copy)]
pub struct RecorderKind;

impl EntityKind for RecorderKind {
    const SECTION: &'static str = RECORDERS;
    const SHAPE: SectionShape = SectionShape::Map;
    const LABEL: &'static str = "recorder";
    const CATEGORY: Option<ComponentCategory> = Some(ComponentCategory::Recorder);

    fn usage_scope() -> UsageScope {
        UsageScope::Anywhere
    }

    fn rename_scope() -> RenameScope {
        RenameScope::AllExcept(COMPONENT_RENAME_EXCLUDED_KEYS)
    }

    fn validate(_name: &str, entity: &Value) -> Result<(), ValidationError> {
        validate_component(Self::LABEL, entity)
    }
}

/// Entries of the `tables` mapping.
#[derive(Debug, Clone, Copy)]
pub struct TableKind;

impl EntityKind for TableKind {
    const SECTION: &'static str = TABLES;
    const SHAPE: SectionShape = SectionShape::Map;
    const LABEL: &'static str = "table";

    fn usage_scope() -> UsageScope {
        UsageScope::Key(TABLE_REFERENCE_KEY)
    }

    fn rename_scope() -> RenameScope {
        RenameScope::Keys(&[TABLE_REFERENCE_KEY])
    }

    fn validate(_name: &str, entity: &Value) -> Result<(), ValidationError> {
        require_object(Self::LABEL, entity).map(|_| ())
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

/// Entries of the `scenarios` list.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioKind;

impl EntityKind for ScenarioKind {
    const SECTION: &'static str = SCENARIOS;
    const SHAPE: SectionShape = SectionShape::List;
    const LABEL: &'static str = "scenario";

    fn usage_scope() -> UsageScope {
        UsageScope::Key(SCENARIO_REFERENCE_KEY)
    }

    fn rename_scope() -> RenameScope {
        RenameScope::Keys(&[SCENARIO_REFERENCE_KEY])
    }

    fn validate(_name: &str, entity: &Value) -> Result<(), ValidationError> {
        let map = require_object(Self::LABEL, entity)?;
        require_string(Self::LABEL, map, NAME)?;
        if let Some(size) = map.get("size") {
            if !size.as_u64().is_some_and(|s| s >= 1) {
                return Err(ValidationError::invalid(
                    Self::LABEL,
                    "'size' must be an integer of at least 1",
                ));
            }
        }
        match map.get("ensemble_names") {
            None | Some(Value::Array(_)) => Ok(()),
            Some(_) => Err(ValidationError::invalid(
                Self::LABEL,
                "'ensemble_names' must be a list",
            )),
        }
    }
}
