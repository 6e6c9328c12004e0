//! Node- and scenario-specific queries on top of the generic collection.

use super::collection::Entities;
use super::component::ComponentValue;
use super::kind::{EntityKind, NodeKind, ParameterKind, RecorderKind, ScenarioKind};
use super::section::type_of;
use crate::base::constants::{COLOR, NAME, POSITION, TYPE};
use serde_json::Value;

/// Node fields that never hold a component.
const NODE_STRUCTURAL_FIELDS: &[&str] = &[NAME, TYPE, POSITION, COLOR, "comment"];

impl<'a> Entities<'a, NodeKind> {
    /// Whether the node aggregates other nodes instead of joining edges.
    pub fn is_virtual(&self, name: &str) -> bool {
        self.get(name).is_some_and(NodeKind::is_virtual)
    }

    /// The node's `type` as written.
    pub fn type_name(&self, name: &str) -> Option<&'a str> {
        type_of(self.get(name)?)
    }

    /// Every component-bearing field of a node, classified.
    ///
    /// Returns `None` for unknown nodes.
    pub fn parameter_refs(&self, name: &str) -> Option<Vec<(&'a str, ComponentValue<'a>)>> {
        let fields = self.get(name)?.as_object()?;
        let parameters = Entities::<ParameterKind>::new(self.root()).names();
        let recorders = Entities::<RecorderKind>::new(self.root()).names();
        Some(
            fields
                .iter()
                .filter(|(key, _)| !NODE_STRUCTURAL_FIELDS.contains(&key.as_str()))
                .map(|(key, value)| {
                    (
                        key.as_str(),
                        ComponentValue::classify(value, &parameters, &recorders),
                    )
                })
                .collect(),
        )
    }
}

impl<'a> Entities<'a, ScenarioKind> {
    /// Number of ensemble members; 1 when unset.
    pub fn size(&self, name: &str) -> Option<u64> {
        let scenario = self.get(name)?;
        Some(scenario.get("size").and_then(Value::as_u64).unwrap_or(1))
    }

    /// Labels of the ensemble members, when given.
    pub fn ensemble_names(&self, name: &str) -> Option<Vec<&'a str>> {
        let names = self.get(name)?.get("ensemble_names")?.as_array()?;
        Some(names.iter().filter_map(Value::as_str).collect())
    }

    /// Product of every scenario size, or `None` if it does not fit in a `u64`.
    pub fn combinations(&self) -> Option<u64> {
        self.names()
            .iter()
            .filter_map(|name| self.size(name))
            .try_fold(1u64, u64::checked_mul)
    }
}
