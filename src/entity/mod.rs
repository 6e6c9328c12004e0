//! Named entities of a model document and the cascades that keep them
//! consistent.
//!
//! Every named section (`nodes`, `parameters`, `recorders`, `tables`,
//! `scenarios`) is served by one generic collection, [`Entities`] for reads
//! and [`EntitiesMut`] for writes, parameterised by an [`EntityKind`]. A kind
//! states where its entities live, how references to them are found and
//! which extra work a delete or rename triggers.
//!
//! ```text
//! EntitiesMut::rename(old, new)
//!   ├─ rewrite identity (map key or `name` field)
//!   ├─ tree::replace over the whole document, scoped by RenameScope
//!   └─ EntityKind::on_rename (nodes: rewrite edge endpoints)
//! ```
//!
//! Mutations return a [`ChangeSet`] listing what they did and append it to
//! the owning [`ChangeLog`].
//!
//! This module has NO dependencies on the `document` or `project` modules.

mod changes;
mod collection;
mod component;
mod edges;
mod error;
mod kind;
mod nodes;
mod references;
mod section;
mod shapes;


pub use changes::{Change, ChangeLog, ChangeSet, LogEntry};
pub use collection::{Entities, EntitiesMut};
pub use component::ComponentValue;
pub use edges::{Edge, Edges, EdgesMut, Slot, SlotPosition, apply_slot, normalize_slot};
pub use error::ValidationError;
pub use kind::{
    EntityKind, NodeKind, ParameterKind, RecorderKind, RenameScope, ScenarioKind, TableKind,
    UsageScope,
};
pub use references::{RefScope, ReferenceIndex};
pub use shapes::{Shapes, ShapesMut};

pub type Nodes<'a> = Entities<'a, NodeKind>;
pub type Parameters<'a> = Entities<'a, ParameterKind>;
pub type Recorders<'a> = Entities<'a, RecorderKind>;
pub type Tables<'a> = Entities<'a, TableKind>;
pub type Scenarios<'a> = Entities<'a, ScenarioKind>;
