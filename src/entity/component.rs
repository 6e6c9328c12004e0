//! Classification of values that may hold a component.

use crate::base::constants::TYPE;
use crate::imports::ComponentCategory;
use indexmap::IndexSet;
use serde_json::Value;

/// What a field value means, resolved once against the document's names.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComponentValue<'a> {
    /// The name of a parameter or recorder defined in the document.
    Reference {
        category: ComponentCategory,
        name: &'a str,
    },
    /// An anonymous component defined in place.
    Inline { type_name: &'a str, value: &'a Value },
    /// Anything else: numbers, plain strings, lists.
    Literal(&'a Value),
}

impl<'a> ComponentValue<'a> {
    /// Classify `value`. Parameters win over recorders when a string
    /// names both.
    pub fn classify(
        value: &'a Value,
        parameters: &IndexSet<&str>,
        recorders: &IndexSet<&str>,
    ) -> Self {
        match value {
            Value::String(name) if parameters.contains(name.as_str()) => ComponentValue::Reference {
                category: ComponentCategory::Parameter,
                name,
            },
            Value::String(name) if recorders.contains(name.as_str()) => ComponentValue::Reference {
                category: ComponentCategory::Recorder,
                name,
            },
            Value::Object(fields) => match fields.get(TYPE).and_then(Value::as_str) {
                Some(type_name) => ComponentValue::Inline { type_name, value },
                None => ComponentValue::Literal(value),
            },
            _ => ComponentValue::Literal(value),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, ComponentValue::Reference { .. })
    }

    /// The referenced name, for references.
    pub fn reference_name(&self) -> Option<&'a str> {
        match self {
            ComponentValue::Reference { name, .. } => Some(name),
            _ => None,
        }
    }
}
