//! Document keys and reference scopes shared across the crate.

// ============================================================================
// TOP-LEVEL SECTIONS
// ============================================================================

pub const METADATA: &str = "metadata";
pub const TIMESTEPPER: &str = "timestepper";
pub const NODES: &str = "nodes";
pub const EDGES: &str = "edges";
pub const PARAMETERS: &str = "parameters";
pub const RECORDERS: &str = "recorders";
pub const SCENARIOS: &str = "scenarios";
pub const TABLES: &str = "tables";
pub const INCLUDES: &str = "includes";
/// Editor-only section, ignored by the simulation engine.
pub const EDITOR: &str = "editor";

/// Shape of a top-level section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionShape {
    /// JSON object.
    Map,
    /// JSON array.
    List,
}

/// Every top-level key with the container shape it must have.
pub const SECTIONS: &[(&str, SectionShape)] = &[
    (METADATA, SectionShape::Map),
    (TIMESTEPPER, SectionShape::Map),
    (NODES, SectionShape::List),
    (EDGES, SectionShape::List),
    (PARAMETERS, SectionShape::Map),
    (RECORDERS, SectionShape::Map),
    (SCENARIOS, SectionShape::List),
    (TABLES, SectionShape::Map),
    (INCLUDES, SectionShape::List),
    (EDITOR, SectionShape::Map),
];

// ============================================================================
// ENTITY FIELDS
// ============================================================================

pub const NAME: &str = "name";
pub const TYPE: &str = "type";
pub const POSITION: &str = "position";
pub const COLOR: &str = "color";
pub const SHAPES: &str = "shapes";

/// Fields under a node's `position` mapping that only the editor uses.
pub const NODE_EDITOR_POSITION_FIELDS: &[&str] =
    &["schematic", "editor_position", "node_style", "edge_color"];

/// Node types that aggregate other nodes and never appear in edges.
pub const VIRTUAL_NODE_TYPES: &[&str] = &[
    "aggregatednode",
    "aggregatedstorage",
    "virtualstorage",
    "annualvirtualstorage",
    "seasonalvirtualstorage",
    "monthlyvirtualstorage",
    "rollingvirtualstorage",
];

// ============================================================================
// REFERENCE SCOPES
// ============================================================================

/// Keys whose values hold node names.
pub const NODE_REFERENCE_KEYS: &[&str] = &["node", "nodes", "storage_node", "storage_nodes"];

/// Key whose values hold table names.
pub const TABLE_REFERENCE_KEY: &str = "table";

/// Key whose values hold scenario names.
pub const SCENARIO_REFERENCE_KEY: &str = "scenario";

/// Keys whose values are never rewritten when a parameter or recorder is
/// renamed. Strings under any other key that equal the old name are treated
/// as references, which is a heuristic: an unrelated value that happens to
/// match the name under a key outside this list is rewritten too.
pub const COMPONENT_RENAME_EXCLUDED_KEYS: &[&str] = &[
    "table",
    "type",
    "name",
    "edges",
    "node",
    "nodes",
    "storage_node",
    "storage_nodes",
    "scenario",
    "url",
    "column",
    "index",
    "index_col",
    "key",
    "position",
    "comment",
    "checksum",
    "parse_dates",
    "sheet_name",
    "ensemble_names",
];

/// Default value written to `metadata.minimum_version` for new documents.
pub const DEFAULT_MINIMUM_VERSION: &str = "1.20";
