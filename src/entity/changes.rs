//! Side effects of document mutations and the time-stamped change log.
//!
//! Every mutating operation returns a [`ChangeSet`] describing exactly what
//! it did. The owning document appends each change to its [`ChangeLog`],
//! which the editor displays and uses as a dirty flag.

use crate::base::TreePath;
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// One side effect of a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Added {
        section: &'static str,
        name: String,
    },
    Updated {
        section: &'static str,
        name: String,
    },
    Deleted {
        section: &'static str,
        name: String,
    },
    Renamed {
        section: &'static str,
        from: String,
        to: String,
    },
    /// A reference elsewhere in the document followed a rename.
    ReferenceUpdated {
        path: TreePath,
        from: String,
        to: String,
    },
    EdgeAdded {
        source: String,
        target: String,
    },
    EdgeUpdated {
        source: String,
        target: String,
    },
    EdgeDeleted {
        source: String,
        target: String,
    },
    /// A string was replaced through the ad hoc replace API.
    Replaced {
        path: TreePath,
        from: String,
        to: String,
    },
    /// A whole section (metadata, timestepper, includes) was rewritten.
    SectionUpdated {
        section: &'static str,
    },
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Added { section, name } => write!(f, "Added '{name}' to {section}"),
            Change::Updated { section, name } => write!(f, "Updated '{name}' in {section}"),
            Change::Deleted { section, name } => write!(f, "Deleted '{name}' from {section}"),
            Change::Renamed { section, from, to } => {
                write!(f, "Renamed '{from}' to '{to}' in {section}")
            }
            Change::ReferenceUpdated { path, from, to } => {
                write!(f, "Changed reference '{from}' to '{to}' at {path}")
            }
            Change::EdgeAdded { source, target } => {
                write!(f, "Added edge from '{source}' to '{target}'")
            }
            Change::EdgeUpdated { source, target } => {
                write!(f, "Updated edge from '{source}' to '{target}'")
            }
            Change::EdgeDeleted { source, target } => {
                write!(f, "Deleted edge from '{source}' to '{target}'")
            }
            Change::Replaced { path, from, to } => {
                write!(f, "Replaced '{from}' with '{to}' at {path}")
            }
            Change::SectionUpdated { section } => write!(f, "Updated {section}"),
        }
    }
}

/// The ordered side effects of one operation. Empty means nothing changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change: Change) {
        self.changes.push(change);
    }

    pub fn append(&mut self, other: ChangeSet) {
        self.changes.extend(other.changes);
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.changes.iter()
    }

    /// Paths of references rewritten by a rename cascade.
    pub fn updated_references(&self) -> Vec<&TreePath> {
        self.changes
            .iter()
            .filter_map(|change| match change {
                Change::ReferenceUpdated { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }
}

impl From<Change> for ChangeSet {
    fn from(change: Change) -> Self {
        Self {
            changes: vec![change],
        }
    }
}

impl IntoIterator for ChangeSet {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

/// One line of the change log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Append-only log of applied changes.
///
/// This is an audit trail and dirty flag, not an undo stack: entries are
/// never replayed.
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    entries: Vec<LogEntry>,
    /// Number of entries present at the last successful save.
    saved_len: usize,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry per change.
    pub fn record(&mut self, changes: &ChangeSet) {
        let timestamp = Utc::now();
        for change in changes {
            tracing::debug!("{}", change);
            self.entries.push(LogEntry {
                id: Uuid::new_v4(),
                timestamp,
                message: change.to_string(),
            });
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Whether anything was ever recorded.
    pub fn has_changes(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Whether entries were recorded since the last successful save.
    pub fn is_dirty(&self) -> bool {
        self.entries.len() > self.saved_len
    }

    pub fn mark_saved(&mut self) {
        self.saved_len = self.entries.len();
    }
}
