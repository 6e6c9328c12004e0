//! Path addressing for values inside a document tree.
//!
//! A path starts at the (implicit) root and records one segment per step:
//!
//! ```text
//! mapping value under key `k`        → /k
//! the i-th key of a mapping itself   → /key/Item #i
//! sequence item at index i           → /Item #i
//! ```
//!
//! Paths are displayed without the leading root separator, so the value at
//! `{"nodes": {"table": "cc"}}["nodes"]["table"]` is `nodes/table`.

use std::fmt;

/// One step from a container into one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Value stored under a mapping key.
    Key(String),
    /// A mapping key tested as a value, at its ordinal position.
    KeyItem(usize),
    /// Sequence item at an index.
    Item(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{key}"),
            Segment::KeyItem(index) => write!(f, "key/Item #{index}"),
            Segment::Item(index) => write!(f, "Item #{index}"),
        }
    }
}

/// Location of a value inside a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TreePath {
    segments: Vec<Segment>,
}

impl TreePath {
    /// The root path.
    pub fn root() -> Self {
        Self::default()
    }

    /// A new path with `segment` appended.
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The key of the nearest enclosing mapping value, skipping sequence
    /// items. Synthetic key segments never count as a parent key.
    pub fn parent_key(&self) -> Option<&str> {
        for segment in self.segments.iter().rev() {
            match segment {
                Segment::Key(key) => return Some(key),
                Segment::Item(_) => continue,
                Segment::KeyItem(_) => return None,
            }
        }
        None
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl PartialEq<&str> for TreePath {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}
