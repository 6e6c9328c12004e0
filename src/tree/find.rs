//! Occurrence search over a document tree.

use crate::base::{Segment, TreePath};
use serde_json::Value;

/// Occurrences of a string found in a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindResult {
    /// Number of occurrences.
    pub count: usize,
    /// Location of every occurrence, in traversal order.
    pub paths: Vec<TreePath>,
}

impl FindResult {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Paths rendered as strings (`nodes/param/Item #0/table`).
    pub fn path_strings(&self) -> Vec<String> {
        self.paths.iter().map(ToString::to_string).collect()
    }

    fn record(&mut self, path: TreePath) {
        self.count += 1;
        self.paths.push(path);
    }
}

/// Find every occurrence of `target` in `tree`.
///
/// Without `match_key`, any string scalar equal to `target` counts, including
/// mapping keys (reported at `…/key/Item #i`) and sequence items. With
/// `match_key`, only string scalars whose nearest enclosing mapping key is
/// `match_key` count; sequences between the key and the scalar are
/// transparent and mapping keys themselves never count.
///
/// ```
/// use hydronet::tree::find;
/// use serde_json::json;
///
/// let tree = json!({"nodes": {"table": "cc", "dd": ["cc"]}});
/// assert_eq!(find(&tree, "cc", None).count, 2);
/// assert_eq!(find(&tree, "cc", Some("table")).path_strings(), vec!["nodes/table"]);
/// ```
pub fn find(tree: &Value, target: &str, match_key: Option<&str>) -> FindResult {
    find_where(tree, match_key, |s| s == target)
}

/// Like [`find`], with an arbitrary predicate instead of string equality.
pub fn find_where(
    tree: &Value,
    match_key: Option<&str>,
    predicate: impl Fn(&str) -> bool,
) -> FindResult {
    let mut result = FindResult::default();
    walk(tree, &TreePath::root(), &predicate, match_key, &mut result);
    result
}

fn walk(
    value: &Value,
    path: &TreePath,
    predicate: &dyn Fn(&str) -> bool,
    match_key: Option<&str>,
    result: &mut FindResult,
) {
    match value {
        Value::Object(map) => {
            if match_key.is_none() {
                for (index, key) in map.keys().enumerate() {
                    if predicate(key.as_str()) {
                        result.record(path.child(Segment::KeyItem(index)));
                    }
                }
            }
            for (key, child) in map {
                walk(
                    child,
                    &path.child(Segment::Key(key.clone())),
                    predicate,
                    match_key,
                    result,
                );
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                walk(item, &path.child(Segment::Item(index)), predicate, match_key, result);
            }
        }
        Value::String(s) if predicate(s.as_str()) => {
            let in_scope = match match_key {
                None => true,
                Some(key) => path.parent_key() == Some(key),
            };
            if in_scope {
                result.record(path.clone());
            }
        }
        _ => {}
    }
}
