//! The generic named-entity collection.

use super::changes::{Change, ChangeLog, ChangeSet};
use super::error::ValidationError;
use super::kind::{EntityKind, UsageScope};
use super::references::ReferenceIndex;
use super::section::{list, list_mut, map, map_mut, name_of, rename_key, type_of};
use crate::base::constants::{NAME, SectionShape};
use crate::base::{Segment, TreePath};
use crate::tree::replace_in_place;
use indexmap::IndexSet;
use serde_json::Value;
use std::marker::PhantomData;

// ============================================================================
// READ ACCESS
// ============================================================================

/// Read access to one section of named entities.
pub struct Entities<'a, K> {
    root: &'a Value,
    _kind: PhantomData<K>,
}

impl<K> Clone for Entities<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Entities<'_, K> {}

impl<'a, K: EntityKind> Entities<'a, K> {
    pub(crate) fn new(root: &'a Value) -> Self {
        Self {
            root,
            _kind: PhantomData,
        }
    }

    pub(crate) fn root(&self) -> &'a Value {
        self.root
    }

    /// Raw entities in document order.
    pub fn list_all(&self) -> Vec<&'a Value> {
        match K::SHAPE {
            SectionShape::List => list(self.root, K::SECTION).iter().collect(),
            SectionShape::Map => map(self.root, K::SECTION)
                .map(|m| m.values().collect())
                .unwrap_or_default(),
        }
    }

    /// Named entities with their names, in document order.
    ///
    /// List items without a string `name` are skipped.
    pub fn entries(&self) -> Vec<(&'a str, &'a Value)> {
        match K::SHAPE {
            SectionShape::List => list(self.root, K::SECTION)
                .iter()
                .filter_map(|entity| name_of(entity).map(|name| (name, entity)))
                .collect(),
            SectionShape::Map => map(self.root, K::SECTION)
                .map(|m| m.iter().map(|(k, v)| (k.as_str(), v)).collect())
                .unwrap_or_default(),
        }
    }

    pub fn names(&self) -> IndexSet<&'a str> {
        self.entries().into_iter().map(|(name, _)| name).collect()
    }

    pub fn len(&self) -> usize {
        self.list_all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn exists(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// The first entity called `name`.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        match K::SHAPE {
            SectionShape::List => list(self.root, K::SECTION)
                .iter()
                .find(|entity| name_of(entity) == Some(name)),
            SectionShape::Map => map(self.root, K::SECTION)?.get(name),
        }
    }

    /// Ordinal of the entity in its section.
    fn position(&self, name: &str) -> Option<usize> {
        match K::SHAPE {
            SectionShape::List => list(self.root, K::SECTION)
                .iter()
                .position(|entity| name_of(entity) == Some(name)),
            SectionShape::Map => map(self.root, K::SECTION)?.keys().position(|key| key == name),
        }
    }

    /// Where the entity's own name is stored, as reported by a search.
    fn definition_path(&self, name: &str) -> Option<TreePath> {
        let index = self.position(name)?;
        let section = TreePath::root().child(Segment::Key(K::SECTION.to_string()));
        Some(match K::SHAPE {
            SectionShape::List => section
                .child(Segment::Item(index))
                .child(Segment::Key(NAME.to_string())),
            SectionShape::Map => section.child(Segment::KeyItem(index)),
        })
    }

    fn references(&self, name: &str) -> Vec<TreePath> {
        let scope = K::usage_scope();
        let found = ReferenceIndex::new(self.root).usages(name, scope.as_ref_scope());
        let own = match scope {
            UsageScope::Anywhere => self.definition_path(name),
            UsageScope::Key(_) => None,
        };
        found
            .paths
            .into_iter()
            .filter(|path| Some(path) != own.as_ref())
            .collect()
    }

    /// Number of references to `name`, not counting its own definition.
    pub fn is_used(&self, name: &str) -> usize {
        self.references(name).len()
    }

    /// Paths of every reference to `name`, not counting its own definition.
    pub fn locations(&self, name: &str) -> Vec<String> {
        self.references(name)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Names of entities nothing refers to, or `None` when every entity is
    /// in use.
    pub fn orphans(&self) -> Option<Vec<String>> {
        let orphans: Vec<String> = self
            .entries()
            .into_iter()
            .filter(|(name, entity)| K::is_orphan(self.root, name, entity, self.is_used(name)))
            .map(|(name, _)| name.to_string())
            .collect();
        (!orphans.is_empty()).then_some(orphans)
    }

    /// Normalised `type` of an entity (`MonthlyProfileParameter` → `monthlyprofile`).
    pub fn type_key(&self, name: &str) -> Option<String> {
        type_of(self.get(name)?).map(normalise_type::<K>)
    }

    /// Names of entities whose type normalises to the same key as `type_name`.
    pub fn find_by_type(&self, type_name: &str) -> Vec<&'a str> {
        let key = normalise_type::<K>(type_name);
        self.entries()
            .into_iter()
            .filter(|(_, entity)| type_of(entity).is_some_and(|t| normalise_type::<K>(t) == key))
            .map(|(name, _)| name)
            .collect()
    }
}

fn normalise_type<K: EntityKind>(type_name: &str) -> String {
    match K::CATEGORY {
        Some(category) => category.key_of(type_name),
        None => type_name.to_lowercase(),
    }
}

// ============================================================================
// WRITE ACCESS
// ============================================================================

/// Write access to one section of named entities.
///
/// Every successful mutation returns the [`ChangeSet`] it performed and
/// appends it to the document's [`ChangeLog`].
pub struct EntitiesMut<'a, K> {
    root: &'a mut Value,
    log: &'a mut ChangeLog,
    _kind: PhantomData<K>,
}

impl<'a, K: EntityKind> EntitiesMut<'a, K> {
    pub(crate) fn new(root: &'a mut Value, log: &'a mut ChangeLog) -> Self {
        Self {
            root,
            log,
            _kind: PhantomData,
        }
    }

    pub fn view(&self) -> Entities<'_, K> {
        Entities::new(self.root)
    }

    /// Add a new entity called `name`.
    ///
    /// For list-shaped kinds `name` supplies the entity's `name` field: a
    /// missing field is filled in, a different one is rejected.
    pub fn add(&mut self, name: &str, entity: Value) -> Result<ChangeSet, ValidationError> {
        let entity = self.prepare(name, entity)?;
        if self.view().exists(name) {
            return Err(ValidationError::duplicate(K::LABEL, name));
        }
        self.insert(name, entity);
        Ok(self.commit(Change::Added {
            section: K::SECTION,
            name: name.to_string(),
        }))
    }

    /// Replace the entity called `name`, or add it when absent.
    pub fn update(&mut self, name: &str, entity: Value) -> Result<ChangeSet, ValidationError> {
        let mut entity = self.prepare(name, entity)?;
        let Some(old) = self.view().get(name) else {
            self.insert(name, entity);
            return Ok(self.commit(Change::Added {
                section: K::SECTION,
                name: name.to_string(),
            }));
        };
        K::merge_on_update(old, &mut entity);
        if *old == entity {
            return Ok(ChangeSet::new());
        }

        match K::SHAPE {
            SectionShape::List => {
                if let Some(slot) = list_mut(self.root, K::SECTION)
                    .and_then(|items| items.iter_mut().find(|e| name_of(e) == Some(name)))
                {
                    *slot = entity;
                }
            }
            SectionShape::Map => {
                if let Some(slot) = map_mut(self.root, K::SECTION).and_then(|m| m.get_mut(name)) {
                    *slot = entity;
                }
            }
        }
        Ok(self.commit(Change::Updated {
            section: K::SECTION,
            name: name.to_string(),
        }))
    }

    /// Remove the entity called `name` and anything that depends on it.
    ///
    /// Unknown names are a no-op.
    pub fn delete(&mut self, name: &str) -> ChangeSet {
        let removed = match K::SHAPE {
            SectionShape::List => list_mut(self.root, K::SECTION).is_some_and(|items| {
                match items.iter().position(|e| name_of(e) == Some(name)) {
                    Some(index) => {
                        items.remove(index);
                        true
                    }
                    None => false,
                }
            }),
            SectionShape::Map => map_mut(self.root, K::SECTION)
                .is_some_and(|m| m.shift_remove(name).is_some()),
        };
        if !removed {
            return ChangeSet::new();
        }

        let mut changes = ChangeSet::from(Change::Deleted {
            section: K::SECTION,
            name: name.to_string(),
        });
        changes.append(K::on_delete(self.root, name));
        self.log.record(&changes);
        changes
    }

    /// Rename `name` to `new_name` and rewrite every reference to it.
    ///
    /// Unknown names and renames to the same name are a no-op.
    pub fn rename(&mut self, name: &str, new_name: &str) -> Result<ChangeSet, ValidationError> {
        if name == new_name || !self.view().exists(name) {
            return Ok(ChangeSet::new());
        }
        if new_name.trim().is_empty() {
            return Err(ValidationError::missing(K::LABEL, NAME));
        }
        if self.view().exists(new_name) {
            return Err(ValidationError::duplicate(K::LABEL, new_name));
        }
        let options = K::rename_scope().options();
        options
            .validate()
            .map_err(|err| ValidationError::invalid(K::LABEL, err.to_string()))?;

        match K::SHAPE {
            SectionShape::List => {
                if let Some(entity) = list_mut(self.root, K::SECTION)
                    .and_then(|items| items.iter_mut().find(|e| name_of(e) == Some(name)))
                    .and_then(Value::as_object_mut)
                {
                    entity.insert(NAME.to_string(), Value::from(new_name));
                }
            }
            SectionShape::Map => {
                if let Some(section) = map_mut(self.root, K::SECTION) {
                    *section = rename_key(section, name, new_name);
                }
            }
        }

        let mut changes = ChangeSet::from(Change::Renamed {
            section: K::SECTION,
            from: name.to_string(),
            to: new_name.to_string(),
        });
        let paths = replace_in_place(self.root, name, new_name, &options)
            .map_err(|err| ValidationError::invalid(K::LABEL, err.to_string()))?;
        for path in paths {
            changes.push(Change::ReferenceUpdated {
                path,
                from: name.to_string(),
                to: new_name.to_string(),
            });
        }
        changes.append(K::on_rename(self.root, name, new_name));

        tracing::debug!(
            "Renamed {} '{}' to '{}' ({} change(s))",
            K::LABEL,
            name,
            new_name,
            changes.len()
        );
        self.log.record(&changes);
        Ok(changes)
    }

    /// Check `entity` and give list entities their `name` field.
    fn prepare(&self, name: &str, mut entity: Value) -> Result<Value, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::missing(K::LABEL, NAME));
        }
        if K::SHAPE == SectionShape::List {
            let Some(fields) = entity.as_object_mut() else {
                return Err(ValidationError::invalid(K::LABEL, "expected a mapping"));
            };
            match fields.get(NAME).and_then(Value::as_str) {
                Some(existing) if existing != name => {
                    return Err(ValidationError::invalid(
                        K::LABEL,
                        format!("name '{existing}' does not match '{name}'"),
                    ));
                }
                Some(_) => {}
                None => {
                    fields.insert(NAME.to_string(), Value::from(name));
                }
            }
        }
        K::validate(name, &entity)?;
        Ok(entity)
    }

    fn insert(&mut self, name: &str, entity: Value) {
        match K::SHAPE {
            SectionShape::List => {
                if let Some(items) = list_mut(self.root, K::SECTION) {
                    items.push(entity);
                }
            }
            SectionShape::Map => {
                if let Some(section) = map_mut(self.root, K::SECTION) {
                    section.insert(name.to_string(), entity);
                }
            }
        }
    }

    fn commit(&mut self, change: Change) -> ChangeSet {
        let changes = ChangeSet::from(change);
        self.log.record(&changes);
        changes
    }
}
