//! String replacement over a document tree.

use super::TreeError;
use crate::base::{KeyScope, Segment, TreePath};
use serde_json::{Map, Value};

/// How [`replace`] decides which occurrences to rewrite.
///
/// At most one of `match_keys` / `exclude_keys` may be set, and
/// `rename_dict_keys` cannot be combined with `match_keys`.
#[derive(Debug, Clone, Default)]
pub struct ReplaceOptions {
    /// Also rename mapping keys equal to the old string.
    pub rename_dict_keys: bool,
    /// Only rewrite scalars held under one of these keys.
    pub match_keys: Option<KeyScope>,
    /// Never rewrite scalars held under one of these keys.
    pub exclude_keys: Option<KeyScope>,
}

impl ReplaceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rename_dict_keys(mut self, value: bool) -> Self {
        self.rename_dict_keys = value;
        self
    }

    pub fn match_keys(mut self, keys: impl Into<KeyScope>) -> Self {
        self.match_keys = Some(keys.into());
        self
    }

    pub fn exclude_keys(mut self, keys: impl Into<KeyScope>) -> Self {
        self.exclude_keys = Some(keys.into());
        self
    }

    /// Reject option combinations that have no meaning.
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.match_keys.is_some() && self.exclude_keys.is_some() {
            return Err(TreeError::invalid_options(
                "match_key and exclude_key cannot be used together",
            ));
        }
        if self.match_keys.is_some() && self.rename_dict_keys {
            return Err(TreeError::invalid_options(
                "rename_dict_keys cannot be used with match_key",
            ));
        }
        Ok(())
    }

    fn rewrites_scalar_under(&self, parent_key: Option<&str>) -> bool {
        if let Some(scope) = &self.match_keys {
            return scope.matches(parent_key);
        }
        if let Some(scope) = &self.exclude_keys {
            return !scope.matches(parent_key);
        }
        true
    }
}

/// A rebuilt tree together with the locations that were rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct Replacement {
    pub tree: Value,
    /// Paths of rewritten scalars and renamed keys, in the input tree.
    pub paths: Vec<TreePath>,
}

impl Replacement {
    pub fn changed(&self) -> bool {
        !self.paths.is_empty()
    }
}

/// Return a copy of `tree` with `old` replaced by `new`.
///
/// ```
/// use hydronet::tree::{replace, ReplaceOptions};
/// use serde_json::json;
///
/// let tree = json!({"a": {"table": "cc", "other": "cc"}});
/// let out = replace(&tree, "cc", "XX", &ReplaceOptions::new().match_keys("table")).unwrap();
/// assert_eq!(out, json!({"a": {"table": "XX", "other": "cc"}}));
/// ```
pub fn replace(
    tree: &Value,
    old: &str,
    new: &str,
    options: &ReplaceOptions,
) -> Result<Value, TreeError> {
    replace_with_report(tree, old, new, options).map(|r| r.tree)
}

/// Like [`replace`], also reporting where the tree changed.
pub fn replace_with_report(
    tree: &Value,
    old: &str,
    new: &str,
    options: &ReplaceOptions,
) -> Result<Replacement, TreeError> {
    options.validate()?;
    let mut replacer = Replacer {
        old,
        new,
        options,
        paths: Vec::new(),
    };
    let tree = replacer.rebuild(tree, &TreePath::root(), None)?;
    Ok(Replacement {
        tree,
        paths: replacer.paths,
    })
}

/// Replace inside `tree` by swapping in the rebuilt value.
pub fn replace_in_place(
    tree: &mut Value,
    old: &str,
    new: &str,
    options: &ReplaceOptions,
) -> Result<Vec<TreePath>, TreeError> {
    let replacement = replace_with_report(tree, old, new, options)?;
    if replacement.changed() {
        *tree = replacement.tree;
    }
    Ok(replacement.paths)
}

struct Replacer<'a> {
    old: &'a str,
    new: &'a str,
    options: &'a ReplaceOptions,
    paths: Vec<TreePath>,
}

impl Replacer<'_> {
    fn rebuild(
        &mut self,
        value: &Value,
        path: &TreePath,
        parent_key: Option<&str>,
    ) -> Result<Value, TreeError> {
        let rebuilt = match value {
            Value::Object(map) => {
                let renames_key = self.options.rename_dict_keys
                    && self.old != self.new
                    && map.contains_key(self.old);
                // Renaming onto a sibling key would drop one of the two entries.
                if renames_key && map.contains_key(self.new) {
                    return Err(TreeError::key_collision(path.to_string(), self.new));
                }
                let mut out = Map::with_capacity(map.len());
                for (index, (key, child)) in map.iter().enumerate() {
                    let child_path = path.child(Segment::Key(key.clone()));
                    let child = self.rebuild(child, &child_path, Some(key.as_str()))?;
                    let key = if renames_key && key == self.old {
                        self.paths.push(path.child(Segment::KeyItem(index)));
                        self.new.to_string()
                    } else {
                        key.clone()
                    };
                    out.insert(key, child);
                }
                Value::Object(out)
            }
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        self.rebuild(item, &path.child(Segment::Item(index)), parent_key)
                    })
                    .collect::<Result<_, _>>()?,
            ),
            Value::String(s) if s == self.old && self.options.rewrites_scalar_under(parent_key) => {
                tracing::trace!(path = %path, old = self.old, new = self.new, "replace scalar");
                self.paths.push(path.clone());
                Value::String(self.new.to_string())
            }
            other => other.clone(),
        };
        Ok(rebuilt)
    }
}
