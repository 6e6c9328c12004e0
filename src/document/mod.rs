//! Loading, validating and saving model documents.
//!
//! A [`DocumentModel`] only exists for a document that passed every
//! load-time check:
//!
//! ```text
//! exists ─▶ writable ─▶ parse ─▶ backfill ─▶ validate ─▶ include collisions
//! ```
//!
//! Any step can fail with a [`LoadError`]; the first failure wins.
//! Saving writes indented JSON ([`SaveOptions::tab_size`], 2 by default).

mod error;
mod model;
mod options;
mod sections;
mod validate;


pub use error::{LoadError, SaveError};
pub use model::DocumentModel;
pub use options::{LoadOptions, SaveOptions};
pub use sections::{Metadata, Timestepper};
