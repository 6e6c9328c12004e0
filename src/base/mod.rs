//! Foundation types for the hydronet toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TreePath`], [`Segment`] - Addresses of values inside a document tree
//! - [`KeyScope`] - Sets of mapping keys that scope matching and replacement
//! - Domain constants (section keys, reference keys, virtual node types)
//!
//! This module has NO dependencies on other hydronet modules.

pub mod constants;
mod path;
mod scope;

pub use path::{Segment, TreePath};
pub use scope::KeyScope;
