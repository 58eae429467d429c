#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `fts` is the traversal engine behind the filesystem-oriented OVAL probes.
//! An [`Fts`] session translates an object's path/filename (or filepath)
//! entities plus its behavior set into walk policy (recursion direction and
//! depth, which node kinds to recurse through, and how to treat filesystem
//! boundaries) and produces a lazy sequence of matching [`FtsEntry`]
//! values.
//!
//! A session scopes its walk by operator: `equals` roots the walk at the
//! literal path, while every other operation scans from the filesystem root
//! and filters per entry. For `pattern match` operations an anchored or
//! absolute pattern additionally enables partial-match pruning, cutting
//! whole subtrees the pattern can never match before they are read from
//! disk; pruning is a pure optimization and never changes the produced set.
//!
//! # Design
//!
//! - [`Fts::open`] validates its inputs eagerly and acquires every owned
//!   resource (pruning automaton, local-device index, walk cursor) before
//!   returning, so a failed open leaks nothing and a returned session can
//!   always be read.
//! - The session borrows its entities for its whole lifetime instead of
//!   sharing ownership with the object model that produced them.
//! - Reading is a synchronous, forward-only pull: each iterator step
//!   advances the underlying cursor zero or more nodes and yields at most
//!   one entry. Detected filesystem cycles are logged and skipped, never
//!   surfaced as errors.
//! - Per-node policy is decided by small decision functions composed in the
//!   read loop, one for the match decision and one for the recursion
//!   directive.
//!
//! # Errors
//!
//! [`FtsError`] covers both failure classes: initialization errors
//! (conflicting sources, malformed entities or behaviors, pattern compile
//! failures, device-index or walk-open failures) returned by [`Fts::open`],
//! and evaluation errors (pattern engine failure mid-walk) that end
//! iteration with a final `Err` item, distinguishable from clean
//! exhaustion.
//!
//! # Examples
//!
//! ```
//! use defs::Behavior;
//! use entity::{Entity, Operation};
//! use fts::Fts;
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! fs::write(temp.path().join("a"), b"data")?;
//!
//! let path = Entity::text("path", temp.path().to_string_lossy(), Operation::Equals);
//! let filename = Entity::text("filename", "a", Operation::Equals);
//! let behaviors = [
//!     Behavior::new("max_depth", "-1"),
//!     Behavior::new("recurse_direction", "down"),
//! ];
//!
//! let session = Fts::open(Some(&path), Some(&filename), None, &behaviors)?;
//! let entries: Vec<_> = session.collect::<Result<_, _>>()?;
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].filename().map(|n| n.to_string_lossy().into_owned()),
//!            Some("a".to_owned()));
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```
//!
//! # See also
//!
//! - [`walk`] for the underlying cursor primitive.
//! - [`defs`] for the object model sessions are configured from.

mod behaviors;
mod entry;
mod error;
mod session;

#[cfg(test)]
mod tests;

pub use crate::behaviors::{FileBehaviors, FilesystemScope, RecurseDirection, RecurseKind};
pub use crate::entry::FtsEntry;
pub use crate::error::FtsError;
pub use crate::session::Fts;
