//! The `edges` section: connections between nodes.
//!
//! An edge is stored as a JSON array `[source, target, slot_source?, slot_target?]`.
//! Slots are optional trailing items that are `null`, a string or an
//! integer. A target slot without a source slot is padded with `null`, and
//! trailing `null`s are dropped otherwise, so an edge has 2, 3 or 4 items.

use super::changes::{Change, ChangeLog, ChangeSet};
use super::section::{list, list_mut, name_of};
use crate::base::constants::{EDGES, NODES};
use indexmap::IndexSet;
use serde_json::Value;
use smol_str::SmolStr;
use std::fmt;

// ============================================================================
// SLOTS
// ============================================================================

/// Identifier of a node slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    Name(SmolStr),
    Index(i64),
}

impl Slot {
    /// Read a slot from an edge item. `null` and other types are `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Slot::Name(SmolStr::new(s))),
            Value::Number(n) => n.as_i64().map(Slot::Index),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Slot::Name(name) => Value::String(name.to_string()),
            Slot::Index(index) => Value::from(*index),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Name(name) => f.write_str(name),
            Slot::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for Slot {
    fn from(name: &str) -> Self {
        Slot::Name(SmolStr::new(name))
    }
}

impl From<i64> for Slot {
    fn from(index: i64) -> Self {
        Slot::Index(index)
    }
}

/// Which end of an edge a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPosition {
    /// Slot on the source node (edge item 2).
    Source = 1,
    /// Slot on the target node (edge item 3).
    Target = 2,
}

/// Normalise an incoming slot value.
///
/// Strings are trimmed and an empty string becomes `null`; integers and
/// `null` pass through. `None` means the value is not a valid slot.
pub fn normalize_slot(value: &Value) -> Option<Value> {
    match value {
        Value::Null => Some(Value::Null),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(Value::Null)
            } else {
                Some(Value::String(trimmed.to_string()))
            }
        }
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(value.clone()),
        _ => None,
    }
}

/// Apply a normalised slot value to a raw edge array.
///
/// | length | slot   | value    | result                                         |
/// |--------|--------|----------|------------------------------------------------|
/// | 2      | source | value    | append                                         |
/// | 2      | target | value    | append `null, value`                           |
/// | 3      | source | null     | truncate to 2                                  |
/// | 3      | source | value    | replace item 2                                 |
/// | 3      | target | value    | append                                         |
/// | 4      | source | null     | item 2 = null if target slot set, else truncate to 2 |
/// | 4      | target | null     | truncate to 3 if source slot set, else to 2    |
/// | 4      | either | value    | replace the item                               |
///
/// Any other combination leaves the edge unchanged.
pub fn apply_slot(edge: &mut Vec<Value>, position: SlotPosition, value: Value) {
    let clear = value.is_null();
    match (edge.len(), position, clear) {
        (2, SlotPosition::Source, false) => edge.push(value),
        (2, SlotPosition::Target, false) => {
            edge.push(Value::Null);
            edge.push(value);
        }
        (3, SlotPosition::Source, true) => edge.truncate(2),
        (3, SlotPosition::Source, false) => edge[2] = value,
        (3, SlotPosition::Target, false) => edge.push(value),
        (4, SlotPosition::Source, true) => {
            if edge[3].is_null() {
                edge.truncate(2);
            } else {
                edge[2] = Value::Null;
            }
        }
        (4, SlotPosition::Target, true) => {
            if edge[2].is_null() {
                edge.truncate(2);
            } else {
                edge.truncate(3);
            }
        }
        (4, SlotPosition::Source, false) => edge[2] = value,
        (4, SlotPosition::Target, false) => edge[3] = value,
        _ => {}
    }
}

// ============================================================================
// EDGE VIEW
// ============================================================================

/// A typed copy of one edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub slot_source: Option<Slot>,
    pub slot_target: Option<Slot>,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            slot_source: None,
            slot_target: None,
        }
    }

    /// Read an edge array; `None` when it does not start with two strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        let items = value.as_array()?;
        let (source, target) = endpoints(items)?;
        Some(Self {
            source: source.to_string(),
            target: target.to_string(),
            slot_source: items.get(2).and_then(Slot::from_value),
            slot_target: items.get(3).and_then(Slot::from_value),
        })
    }

    /// The shortest array holding this edge.
    pub fn to_value(&self) -> Value {
        let mut items = vec![
            Value::String(self.source.clone()),
            Value::String(self.target.clone()),
        ];
        if let Some(slot) = &self.slot_source {
            apply_slot(&mut items, SlotPosition::Source, slot.to_value());
        }
        if let Some(slot) = &self.slot_target {
            apply_slot(&mut items, SlotPosition::Target, slot.to_value());
        }
        Value::Array(items)
    }

    pub fn slot(&self, position: SlotPosition) -> Option<&Slot> {
        match position {
            SlotPosition::Source => self.slot_source.as_ref(),
            SlotPosition::Target => self.slot_target.as_ref(),
        }
    }
}

fn endpoints(items: &[Value]) -> Option<(&str, &str)> {
    Some((items.first()?.as_str()?, items.get(1)?.as_str()?))
}

fn connects(edge: &Value, source: &str, target: &str) -> bool {
    edge.as_array()
        .and_then(|items| endpoints(items))
        .is_some_and(|(s, t)| s == source && t == target)
}

// ============================================================================
// READ ACCESS
// ============================================================================

/// Read access to the `edges` section.
#[derive(Clone, Copy)]
pub struct Edges<'a> {
    root: &'a Value,
}

impl<'a> Edges<'a> {
    pub(crate) fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// Raw edge arrays, in document order.
    pub fn list_all(&self) -> &'a [Value] {
        list(self.root, EDGES)
    }

    /// Typed edges, skipping malformed entries.
    pub fn iter(&self) -> impl Iterator<Item = Edge> + 'a {
        self.list_all().iter().filter_map(Edge::from_value)
    }

    pub fn count(&self) -> usize {
        self.list_all().len()
    }

    /// The first edge from `source` to `target`, with its index.
    pub fn find(&self, source: &str, target: &str) -> Option<(&'a Value, usize)> {
        self.list_all()
            .iter()
            .enumerate()
            .find(|(_, edge)| connects(edge, source, target))
            .map(|(index, edge)| (edge, index))
    }

    pub fn exists(&self, source: &str, target: &str) -> bool {
        self.find(source, target).is_some()
    }

    pub fn get_slot(&self, source: &str, target: &str, position: SlotPosition) -> Option<Slot> {
        let (edge, _) = self.find(source, target)?;
        Edge::from_value(edge)?.slot(position).cloned()
    }

    /// Names of every node used as an edge endpoint.
    pub fn nodes_with_edges(&self) -> IndexSet<&'a str> {
        self.list_all()
            .iter()
            .filter_map(|edge| edge.as_array().and_then(|items| endpoints(items)))
            .flat_map(|(source, target)| [source, target])
            .collect()
    }

    /// Whether `node` is an endpoint of any edge.
    pub fn is_connected(&self, node: &str) -> bool {
        self.list_all().iter().any(|edge| {
            edge.as_array()
                .and_then(|items| endpoints(items))
                .is_some_and(|(s, t)| s == node || t == node)
        })
    }

    /// Targets of edges leaving `source`.
    pub fn targets_of(&self, source: &str) -> Vec<&'a str> {
        self.list_all()
            .iter()
            .filter_map(|edge| edge.as_array().and_then(|items| endpoints(items)))
            .filter(|(s, _)| *s == source)
            .map(|(_, t)| t)
            .collect()
    }

    /// Sources of edges entering `target`.
    pub fn sources_of(&self, target: &str) -> Vec<&'a str> {
        self.list_all()
            .iter()
            .filter_map(|edge| edge.as_array().and_then(|items| endpoints(items)))
            .filter(|(_, t)| *t == target)
            .map(|(s, _)| s)
            .collect()
    }
}

// ============================================================================
// WRITE ACCESS
// ============================================================================

/// Write access to the `edges` section. Every change is logged.
pub struct EdgesMut<'a> {
    root: &'a mut Value,
    log: &'a mut ChangeLog,
}

impl<'a> EdgesMut<'a> {
    pub(crate) fn new(root: &'a mut Value, log: &'a mut ChangeLog) -> Self {
        Self { root, log }
    }

    pub fn view(&self) -> Edges<'_> {
        Edges::new(self.root)
    }

    /// Connect two existing nodes. Nothing happens when either node is
    /// unknown or a slot value is not a string or integer.
    pub fn add(
        &mut self,
        source: &str,
        target: &str,
        slot_source: Option<Value>,
        slot_target: Option<Value>,
    ) -> ChangeSet {
        let known = list(self.root, NODES)
            .iter()
            .filter_map(name_of)
            .collect::<IndexSet<_>>();
        if !known.contains(source) || !known.contains(target) {
            tracing::debug!("Edge {} -> {} not added: unknown node", source, target);
            return ChangeSet::new();
        }

        let mut items = vec![Value::from(source), Value::from(target)];
        for (position, value) in [
            (SlotPosition::Source, slot_source),
            (SlotPosition::Target, slot_target),
        ] {
            let Some(value) = value else { continue };
            match normalize_slot(&value) {
                Some(slot) => apply_slot(&mut items, position, slot),
                None => return ChangeSet::new(),
            }
        }

        let Some(edges) = list_mut(self.root, EDGES) else {
            return ChangeSet::new();
        };
        edges.push(Value::Array(items));
        self.commit(Change::EdgeAdded {
            source: source.to_string(),
            target: target.to_string(),
        })
    }

    /// Delete edges by endpoint.
    ///
    /// - source only: every edge leaving `source`
    /// - target only: every edge entering `target`
    /// - both: the first edge from `source` to `target` (slots ignored)
    pub fn delete(&mut self, source: Option<&str>, target: Option<&str>) -> ChangeSet {
        let Some(edges) = list_mut(self.root, EDGES) else {
            return ChangeSet::new();
        };
        let mut changes = ChangeSet::new();
        match (source, target) {
            (Some(source), Some(target)) => {
                if let Some(index) = edges.iter().position(|e| connects(e, source, target)) {
                    edges.remove(index);
                    changes.push(Change::EdgeDeleted {
                        source: source.to_string(),
                        target: target.to_string(),
                    });
                }
            }
            (Some(_), None) | (None, Some(_)) => {
                changes = remove_edges(edges, |s, t| {
                    source.is_some_and(|n| n == s) || target.is_some_and(|n| n == t)
                });
            }
            (None, None) => {}
        }
        self.log.record(&changes);
        changes
    }

    /// Set or clear a slot on the edge from `source` to `target`.
    pub fn set_slot(
        &mut self,
        source: &str,
        target: &str,
        position: SlotPosition,
        value: &Value,
    ) -> ChangeSet {
        let Some(value) = normalize_slot(value) else {
            return ChangeSet::new();
        };
        let Some(edges) = list_mut(self.root, EDGES) else {
            return ChangeSet::new();
        };
        let Some(items) = edges
            .iter_mut()
            .find(|e| connects(e, source, target))
            .and_then(Value::as_array_mut)
        else {
            return ChangeSet::new();
        };

        let before = items.clone();
        apply_slot(items, position, value);
        if *items == before {
            return ChangeSet::new();
        }
        self.commit(Change::EdgeUpdated {
            source: source.to_string(),
            target: target.to_string(),
        })
    }

    /// Point every edge endpoint named `old` at `new`.
    pub fn rename_node(&mut self, old: &str, new: &str) -> ChangeSet {
        let changes = rename_node_in_edges(self.root, old, new);
        self.log.record(&changes);
        changes
    }

    fn commit(&mut self, change: Change) -> ChangeSet {
        let changes = ChangeSet::from(change);
        self.log.record(&changes);
        changes
    }
}

// ============================================================================
// CASCADES (used by the node collection)
// ============================================================================

fn remove_edges(edges: &mut Vec<Value>, matches: impl Fn(&str, &str) -> bool) -> ChangeSet {
    let mut changes = ChangeSet::new();
    edges.retain(|edge| {
        let Some((source, target)) = edge.as_array().and_then(|items| endpoints(items)) else {
            return true;
        };
        if matches(source, target) {
            changes.push(Change::EdgeDeleted {
                source: source.to_string(),
                target: target.to_string(),
            });
            false
        } else {
            true
        }
    });
    changes
}

/// Remove every edge touching `node`.
pub(crate) fn delete_node_edges(root: &mut Value, node: &str) -> ChangeSet {
    match list_mut(root, EDGES) {
        Some(edges) => remove_edges(edges, |s, t| s == node || t == node),
        None => ChangeSet::new(),
    }
}

/// Rewrite edge endpoints named `old` to `new`.
pub(crate) fn rename_node_in_edges(root: &mut Value, old: &str, new: &str) -> ChangeSet {
    let mut changes = ChangeSet::new();
    let Some(edges) = list_mut(root, EDGES) else {
        return changes;
    };
    for edge in edges.iter_mut() {
        let Some(items) = edge.as_array_mut() else {
            continue;
        };
        let mut touched = false;
        for endpoint in items.iter_mut().take(2) {
            if endpoint.as_str() == Some(old) {
                *endpoint = Value::from(new);
                touched = true;
            }
        }
        if touched {
            if let Some((source, target)) = endpoints(items) {
                changes.push(Change::EdgeUpdated {
                    source: source.to_string(),
                    target: target.to_string(),
                });
            }
        }
    }
    changes
}
