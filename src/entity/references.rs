//! Where a name is used in a document.

use crate::base::constants::TYPE;
use crate::imports::ComponentCategory;
use crate::tree::{FindResult, find, find_where};
use serde_json::Value;

/// Which occurrences of a name count as usages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefScope<'k> {
    /// Any string equal to the name, including mapping keys.
    Any,
    /// Only strings held under this mapping key.
    Key(&'k str),
}

impl<'k> RefScope<'k> {
    fn match_key(self) -> Option<&'k str> {
        match self {
            RefScope::Any => None,
            RefScope::Key(key) => Some(key),
        }
    }
}

/// Usage counts and locations of names within one document.
///
/// Borrows the document root; build a new index after mutating it.
#[derive(Clone, Copy)]
pub struct ReferenceIndex<'a> {
    root: &'a Value,
}

impl<'a> ReferenceIndex<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// Every occurrence of `name` within `scope`.
    pub fn usages(&self, name: &str, scope: RefScope<'_>) -> FindResult {
        let result = find(self.root, name, scope.match_key());
        tracing::trace!(
            "Found {} occurrence(s) of '{}' ({:?})",
            result.count,
            name,
            scope
        );
        result
    }

    pub fn count(&self, name: &str, scope: RefScope<'_>) -> usize {
        self.usages(name, scope).count
    }

    /// Paths of every occurrence, as displayed to the user.
    pub fn locations(&self, name: &str, scope: RefScope<'_>) -> Vec<String> {
        self.usages(name, scope).path_strings()
    }

    /// Whether any `type` field resolves to the class `class_name`.
    ///
    /// `type` values are compared by their normalised key, so a class
    /// `LicenseParameter` is referenced by `"type": "license"` as well as
    /// by `"type": "LicenseParameter"`.
    pub fn is_referenced_as_type(&self, category: ComponentCategory, class_name: &str) -> bool {
        let key = category.key_of(class_name);
        !find_where(self.root, Some(TYPE), |value| category.key_of(value) == key).is_empty()
    }
}
