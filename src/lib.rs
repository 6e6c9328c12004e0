//! # hydronet-base
//!
//! Core library for editing water-resource network model files: nested
//! search and replace, reference tracking, and entity collections that keep
//! nodes, edges, parameters, recorders, tables and scenarios consistent
//! across renames and deletes.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → Session: load state machine around one document
//!   ↓
//! document  → DocumentModel: load, validate, change log, save
//!   ↓
//! entity    → Entity collections, edges, rename/delete cascades
//!   ↓
//! imports   → Logos lexer, include-file class scanner
//!   ↓
//! tree      → Pathed find/replace over JSON trees
//!   ↓
//! base      → Primitives (TreePath, KeyScope, section constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → tree → imports → entity → document → project)
// ============================================================================

/// Foundation types: TreePath, KeyScope, document constants
pub mod base;

/// Tree search and replace with path tracking
pub mod tree;

/// Include-file scanning and component classification
pub mod imports;

/// Named entity collections and their cascades
pub mod entity;

/// Document loading, validation and saving
pub mod document;

/// Editor sessions
pub mod project;

// Re-export foundation types
pub use base::{KeyScope, Segment, TreePath};
pub use document::{DocumentModel, LoadError, LoadOptions, SaveError, SaveOptions};
pub use project::{Session, SessionState};
