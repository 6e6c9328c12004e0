//! Generic search and replace over nested documents.
//!
//! A document tree is a [`serde_json::Value`]: mappings, sequences and
//! scalars. This module knows nothing about nodes, edges or parameters; it
//! only walks the tree, tracks the [`TreePath`](crate::base::TreePath) of each
//! value and the mapping key a value sits under.
//!
//! ## Scoping
//!
//! The "parent key" of a scalar is the key of the nearest enclosing mapping
//! entry. Sequence items do not interrupt it, so in
//! `{"nodes": ["a", ["b"]]}` both `"a"` and `"b"` sit under `nodes`.
//!
//! - [`find`] with `match_key` counts scalars whose parent key matches.
//! - [`replace`] with `match_keys` rewrites only scalars under those keys;
//!   with `exclude_keys` rewrites everything except scalars under those keys.

mod find;
mod replace;

#[cfg(test)]
mod tests;

pub use find::{FindResult, find, find_where};
pub use replace::{
    ReplaceOptions, Replacement, replace, replace_in_place, replace_with_report,
};

use thiserror::Error;

/// Errors raised by tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The replacement options combine incompatible settings.
    #[error("Invalid replace options: {0}")]
    InvalidOptions(String),

    /// A key rename would overwrite an existing key in the same mapping.
    #[error("Cannot rename a key to '{key}' at '{path}': the key already exists")]
    KeyCollision { path: String, key: String },
}

impl TreeError {
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions(message.into())
    }

    pub fn key_collision(path: impl Into<String>, key: impl Into<String>) -> Self {
        Self::KeyCollision {
            path: path.into(),
            key: key.into(),
        }
    }
}
