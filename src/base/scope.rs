//! Sets of mapping keys used to scope matching and replacement.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

/// A set of mapping key names.
///
/// Built from a single key, an array or a slice of keys:
///
/// ```
/// use hydronet::base::KeyScope;
///
/// let scope = KeyScope::from(["node", "nodes"]);
/// assert!(scope.contains("nodes"));
/// assert!(!scope.contains("table"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyScope {
    keys: FxHashSet<SmolStr>,
}

impl KeyScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: impl Into<SmolStr>) -> Self {
        self.keys.insert(key.into());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Whether `key` is present and in the scope.
    pub fn matches(&self, key: Option<&str>) -> bool {
        key.is_some_and(|k| self.contains(k))
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

impl From<&str> for KeyScope {
    fn from(key: &str) -> Self {
        Self::new().with_key(key)
    }
}

impl From<&[&str]> for KeyScope {
    fn from(keys: &[&str]) -> Self {
        keys.iter().copied().collect()
    }
}

impl<const N: usize> From<[&str; N]> for KeyScope {
    fn from(keys: [&str; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<'a> FromIterator<&'a str> for KeyScope {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(SmolStr::new).collect(),
        }
    }
}
