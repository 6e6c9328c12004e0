//! Errors for entities passed into collection mutations.

use thiserror::Error;

/// A malformed entity was passed to `add`, `update` or `rename`.
///
/// Raised before anything is written: the document is left unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required identity field is missing or empty.
    #[error("The {kind} is missing a valid '{field}' key")]
    MissingField { kind: &'static str, field: &'static str },

    /// A field is present but has the wrong type or value.
    #[error("Invalid {kind}: {message}")]
    InvalidField { kind: &'static str, message: String },

    /// The name is already taken in its section.
    #[error("A {kind} named '{name}' already exists")]
    Duplicate { kind: &'static str, name: String },
}

impl ValidationError {
    pub fn missing(kind: &'static str, field: &'static str) -> Self {
        Self::MissingField { kind, field }
    }

    pub fn invalid(kind: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            kind,
            message: message.into(),
        }
    }

    pub fn duplicate(kind: &'static str, name: impl Into<String>) -> Self {
        Self::Duplicate {
            kind,
            name: name.into(),
        }
    }
}
