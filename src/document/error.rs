//! Error types for loading and saving documents.

use crate::imports::ComponentCategory;
use std::path::PathBuf;
use thiserror::Error;

/// Why a document could not be loaded.
///
/// Loading stops at the first failure; the message is meant for the user.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file does not exist.
    #[error("The file '{}' does not exist", .0.display())]
    NotFound(PathBuf),

    /// The file cannot be written, so edits could not be saved.
    #[error("The file '{}' is read-only", .0.display())]
    ReadOnly(PathBuf),

    /// IO error while reading the file.
    #[error("Cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("The model file is not valid JSON: {message} (line {line}, column {column})")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    /// The JSON does not describe a valid model.
    #[error("{0}")]
    Schema(String),

    /// A custom class registers under the key of a built-in component.
    #[error(
        "The custom {category} '{class}' in '{}' has the same name as a built-in {category}",
        .file.display()
    )]
    NameCollision {
        category: ComponentCategory,
        class: String,
        file: PathBuf,
    },
}

impl LoadError {
    /// Create a schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    pub(crate) fn parse(err: &serde_json::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

/// Why a document could not be saved. The in-memory document is unchanged
/// and stays dirty.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The document was never given a file path.
    #[error("The model has no file path")]
    NoPath,

    /// The document could not be serialised.
    #[error("Cannot serialise the model: {0}")]
    Serialize(#[from] serde_json::Error),

    /// IO error while writing.
    #[error("Cannot write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
