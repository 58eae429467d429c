#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `defs` is the object content model the filesystem probes read their
//! inputs from: a [`DefinitionModel`] owns a table of [`Object`] values,
//! each carrying a subtype, optional behaviors, ordered content entries, and
//! free-text notes. Objects are populated incrementally while a document is
//! parsed, and a model can be locked once evaluation starts, after which
//! every mutator on every object it owns becomes a logged no-op rather than
//! an error, matching the soft-fail policy of existing OVAL tooling.
//!
//! # Design
//!
//! - [`DefinitionModel`] is a shared-ownership container (`Arc`). Its object
//!   table registers by id with last-write-wins semantics, and its locked
//!   flag is a single atomic set exactly once.
//! - [`Object`] holds its mutable state behind a reader/writer lock so
//!   iteration and validity checks stay safe from multiple threads once the
//!   model is locked. Mutators report whether they applied, but never fail.
//! - [`Object::clone_into`] reuses an existing object by id in the target
//!   model rather than duplicating it, and otherwise deep-copies the object
//!   field by field.
//! - [`DocNode`] is the generic tree/attribute representation objects
//!   serialize into; the element name is derived from the subtype
//!   (`"<subtype>_object"`) and the namespace from the subtype's family.
//!
//! # See also
//!
//! - [`entity`] for the typed values object content entries reference.

mod behavior;
mod content;
mod model;
mod node;
mod object;
mod subtype;


pub use crate::behavior::Behavior;
pub use crate::content::{Filter, FilterAction, ObjectContent, SetExpression, SetOperation};
pub use crate::model::DefinitionModel;
pub use crate::node::DocNode;
pub use crate::object::Object;
pub use crate::subtype::{Family, OVAL_DEFINITIONS_NAMESPACE, Subtype};
