//! Typed views of the `metadata` and `timestepper` sections.

use crate::base::constants::DEFAULT_MINIMUM_VERSION;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `metadata` section.
///
/// Unknown keys are kept in `extra` so a round trip through this struct
/// does not drop them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Informational only; no migration is done on load.
    #[serde(default = "default_minimum_version")]
    pub minimum_version: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_minimum_version() -> String {
    DEFAULT_MINIMUM_VERSION.to_string()
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            minimum_version: default_minimum_version(),
            extra: Map::new(),
        }
    }
}

impl Metadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// The `timestepper` section. Dates are kept as written (`YYYY-MM-DD`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Timestepper {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,

    /// Length of a time step, in days or as a pandas frequency string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestep: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
