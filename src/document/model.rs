//! The loaded document and its entity collections.

use super::error::{LoadError, SaveError};
use super::options::{LoadOptions, SaveOptions};
use super::sections::{Metadata, Timestepper};
use super::validate;
use crate::base::constants::{INCLUDES, METADATA, TIMESTEPPER};
use crate::entity::{
    Change, ChangeLog, ChangeSet, Edges, EdgesMut, EntitiesMut, NodeKind, Nodes, ParameterKind,
    Parameters, RecorderKind, Recorders, ReferenceIndex, ScenarioKind, Scenarios, Shapes,
    ShapesMut, TableKind, Tables,
};
use crate::imports::{ComponentCategory, ImportRecord, scan_source_file};
use crate::tree::{FindResult, ReplaceOptions, TreeError, find, replace_in_place};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A model document that passed load-time validation.
///
/// Owns the JSON root exclusively. Reads go through the collection views
/// (`nodes()`, `parameters()`, ...) and writes through their `_mut`
/// counterparts, which log every change.
#[derive(Debug, Clone)]
pub struct DocumentModel {
    root: Value,
    path: Option<PathBuf>,
    log: ChangeLog,
    imports: Vec<ImportRecord>,
    save_options: SaveOptions,
}

impl Default for DocumentModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentModel {
    // ── Construction ─────────────────────────────────────────────────

    /// An empty document with default metadata and no file path.
    pub fn new() -> Self {
        let mut root = Map::new();
        validate::backfill(&mut root);
        if let Ok(metadata) = serde_json::to_value(Metadata::default()) {
            root.insert(METADATA.to_string(), metadata);
        }
        Self::with_root(Value::Object(root), None)
    }

    /// Load and validate a document from disk.
    ///
    /// Steps run in a fixed order and the first failure is returned:
    /// existence, write permission, JSON parse, backfill of missing
    /// sections, schema validation, custom component name collisions.
    pub fn open(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self, LoadError> {
        let path = path.as_ref();
        tracing::debug!("Loading model {}", path.display());

        if !path.is_file() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        if options.check_write_permission {
            let metadata = std::fs::metadata(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            if metadata.permissions().readonly() {
                return Err(LoadError::ReadOnly(path.to_path_buf()));
            }
        }
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let root: Value = serde_json::from_str(&text).map_err(|e| LoadError::parse(&e))?;

        let mut model = Self::from_root(root, Some(path.to_path_buf()))?;
        if options.scan_includes {
            model.rescan_includes();
            validate::check_collisions(&model.imports)?;
        }
        tracing::debug!(
            "Loaded {} node(s), {} edge(s), {} parameter(s)",
            model.nodes().len(),
            model.edges().count(),
            model.parameters().len()
        );
        Ok(model)
    }

    /// Parse and validate a document held in memory. Includes are not scanned.
    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        let root: Value = serde_json::from_str(text).map_err(|e| LoadError::parse(&e))?;
        Self::from_root(root, None)
    }

    /// Validate an already parsed document. Includes are not scanned.
    pub fn from_value(root: Value) -> Result<Self, LoadError> {
        Self::from_root(root, None)
    }

    fn from_root(root: Value, path: Option<PathBuf>) -> Result<Self, LoadError> {
        let Value::Object(mut map) = root else {
            return Err(LoadError::schema("The model file must contain a JSON object"));
        };
        validate::backfill(&mut map);
        validate::validate(&map)?;
        Ok(Self::with_root(Value::Object(map), path))
    }

    fn with_root(root: Value, path: Option<PathBuf>) -> Self {
        Self {
            root,
            path,
            log: ChangeLog::new(),
            imports: Vec::new(),
            save_options: SaveOptions::default(),
        }
    }

    // ── State ────────────────────────────────────────────────────────

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The raw document root. Always a JSON object.
    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn log(&self) -> &ChangeLog {
        &self.log
    }

    /// Whether anything was changed since load.
    pub fn has_changes(&self) -> bool {
        self.log.has_changes()
    }

    /// Whether anything was changed since load or the last save.
    pub fn is_dirty(&self) -> bool {
        self.log.is_dirty()
    }

    pub fn save_options(&self) -> &SaveOptions {
        &self.save_options
    }

    pub fn set_save_options(&mut self, options: SaveOptions) {
        self.save_options = options;
    }

    // ── Collections ──────────────────────────────────────────────────

    pub fn nodes(&self) -> Nodes<'_> {
        Nodes::new(&self.root)
    }

    pub fn nodes_mut(&mut self) -> EntitiesMut<'_, NodeKind> {
        EntitiesMut::new(&mut self.root, &mut self.log)
    }

    pub fn edges(&self) -> Edges<'_> {
        Edges::new(&self.root)
    }

    pub fn edges_mut(&mut self) -> EdgesMut<'_> {
        EdgesMut::new(&mut self.root, &mut self.log)
    }

    pub fn parameters(&self) -> Parameters<'_> {
        Parameters::new(&self.root)
    }

    pub fn parameters_mut(&mut self) -> EntitiesMut<'_, ParameterKind> {
        EntitiesMut::new(&mut self.root, &mut self.log)
    }

    pub fn recorders(&self) -> Recorders<'_> {
        Recorders::new(&self.root)
    }

    pub fn recorders_mut(&mut self) -> EntitiesMut<'_, RecorderKind> {
        EntitiesMut::new(&mut self.root, &mut self.log)
    }

    pub fn tables(&self) -> Tables<'_> {
        Tables::new(&self.root)
    }

    pub fn tables_mut(&mut self) -> EntitiesMut<'_, TableKind> {
        EntitiesMut::new(&mut self.root, &mut self.log)
    }

    pub fn scenarios(&self) -> Scenarios<'_> {
        Scenarios::new(&self.root)
    }

    pub fn scenarios_mut(&mut self) -> EntitiesMut<'_, ScenarioKind> {
        EntitiesMut::new(&mut self.root, &mut self.log)
    }

    pub fn shapes(&self) -> Shapes<'_> {
        Shapes::new(&self.root)
    }

    pub fn shapes_mut(&mut self) -> ShapesMut<'_> {
        ShapesMut::new(&mut self.root, &mut self.log)
    }

    // ── Ad hoc search and replace ────────────────────────────────────

    pub fn references(&self) -> ReferenceIndex<'_> {
        ReferenceIndex::new(&self.root)
    }

    /// Find `target` anywhere in the document.
    pub fn find(&self, target: &str, match_key: Option<&str>) -> FindResult {
        find(&self.root, target, match_key)
    }

    /// Replace `old` with `new` across the whole document.
    ///
    /// No cascade runs; callers doing their own consistency updates use
    /// this directly. Each rewritten location is logged.
    pub fn replace(
        &mut self,
        old: &str,
        new: &str,
        options: &ReplaceOptions,
    ) -> Result<ChangeSet, TreeError> {
        let paths = replace_in_place(&mut self.root, old, new, options)?;
        let mut changes = ChangeSet::new();
        for path in paths {
            changes.push(Change::Replaced {
                path,
                from: old.to_string(),
                to: new.to_string(),
            });
        }
        self.log.record(&changes);
        Ok(changes)
    }

    // ── Metadata and timestepper ─────────────────────────────────────

    pub fn metadata(&self) -> Result<Metadata, serde_json::Error> {
        serde_json::from_value(self.root[METADATA].clone())
    }

    pub fn set_metadata(&mut self, metadata: &Metadata) -> Result<ChangeSet, serde_json::Error> {
        let value = serde_json::to_value(metadata)?;
        Ok(self.set_section(METADATA, value))
    }

    pub fn timestepper(&self) -> Result<Timestepper, serde_json::Error> {
        serde_json::from_value(self.root[TIMESTEPPER].clone())
    }

    pub fn set_timestepper(
        &mut self,
        timestepper: &Timestepper,
    ) -> Result<ChangeSet, serde_json::Error> {
        let value = serde_json::to_value(timestepper)?;
        Ok(self.set_section(TIMESTEPPER, value))
    }

    fn set_section(&mut self, section: &'static str, value: Value) -> ChangeSet {
        if self.root.get(section) == Some(&value) {
            return ChangeSet::new();
        }
        if let Some(root) = self.root.as_object_mut() {
            root.insert(section.to_string(), value);
        }
        let changes = ChangeSet::from(Change::SectionUpdated { section });
        self.log.record(&changes);
        changes
    }

    // ── Includes ─────────────────────────────────────────────────────

    /// Entries of the `includes` list, as written.
    pub fn includes(&self) -> Vec<&str> {
        self.root
            .get(INCLUDES)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn add_include(&mut self, include: &str) -> ChangeSet {
        if include.trim().is_empty() || self.includes().contains(&include) {
            return ChangeSet::new();
        }
        let Some(items) = self
            .root
            .as_object_mut()
            .and_then(|root| root.get_mut(INCLUDES))
            .and_then(Value::as_array_mut)
        else {
            return ChangeSet::new();
        };
        items.push(Value::from(include));
        self.rescan_includes();

        let changes = ChangeSet::from(Change::Added {
            section: INCLUDES,
            name: include.to_string(),
        });
        self.log.record(&changes);
        changes
    }

    pub fn remove_include(&mut self, include: &str) -> ChangeSet {
        let Some(items) = self
            .root
            .as_object_mut()
            .and_then(|root| root.get_mut(INCLUDES))
            .and_then(Value::as_array_mut)
        else {
            return ChangeSet::new();
        };
        let Some(index) = items.iter().position(|item| item.as_str() == Some(include)) else {
            return ChangeSet::new();
        };
        items.remove(index);
        self.rescan_includes();

        let changes = ChangeSet::from(Change::Deleted {
            section: INCLUDES,
            name: include.to_string(),
        });
        self.log.record(&changes);
        changes
    }

    /// Scan every Python include, relative to the document's directory.
    pub fn rescan_includes(&mut self) {
        let base = self.path.as_deref().and_then(Path::parent);
        let records: Vec<ImportRecord> = self
            .includes()
            .into_iter()
            .filter(|include| Path::new(include).extension().is_some_and(|ext| ext == "py"))
            .map(|include| {
                let path = match base {
                    Some(dir) => dir.join(include),
                    None => PathBuf::from(include),
                };
                let record = scan_source_file(&path);
                if !record.exists {
                    tracing::warn!("Include {} does not exist", path.display());
                }
                record
            })
            .collect();
        self.imports = records;
    }

    /// Scan results of the last include scan.
    pub fn import_records(&self) -> &[ImportRecord] {
        &self.imports
    }

    /// Every custom class found in the includes, in priority order per file.
    pub fn custom_components(&self) -> Vec<(ComponentCategory, &str)> {
        self.imports
            .iter()
            .flat_map(ImportRecord::components)
            .collect()
    }

    // ── Saving ───────────────────────────────────────────────────────

    /// The document as indented JSON.
    pub fn to_json_string(&self) -> Result<String, SaveError> {
        let indent = self.save_options.indent();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.root.serialize(&mut serializer)?;
        String::from_utf8(buffer)
            .map_err(|e| SaveError::Serialize(serde::ser::Error::custom(e)))
    }

    /// Write the document back to the file it was loaded from.
    pub fn save(&mut self) -> Result<(), SaveError> {
        let path = self.path.clone().ok_or(SaveError::NoPath)?;
        self.write(&path)
    }

    /// Write the document to `path`, which becomes its file path.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        let path = path.as_ref().to_path_buf();
        self.write(&path)?;
        self.path = Some(path);
        Ok(())
    }

    fn write(&mut self, path: &Path) -> Result<(), SaveError> {
        let json = self.to_json_string()?;
        std::fs::write(path, json).map_err(|source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.log.mark_saved();
        tracing::debug!("Saved model to {}", path.display());
        Ok(())
    }
}
