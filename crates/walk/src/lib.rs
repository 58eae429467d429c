#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` provides the deterministic filesystem traversal primitive the OVAL
//! filesystem probes are built on. The walker enumerates one or more root
//! paths depth-first, reporting directories both on the way in and on the way
//! out, and reports symbolic links physically: a link is never followed
//! unless the caller asks for it on that specific node. Directory entries are
//! sorted byte-wise before being yielded so the sequence is stable across
//! platforms and filesystems.
//!
//! # Design
//!
//! - [`WalkBuilder`] configures the root set and whether descent may cross
//!   filesystem boundaries.
//! - [`Walker`] implements [`Iterator`] and yields [`WalkNode`] values. After
//!   a node has been yielded the caller may issue a directive for it:
//!   [`Walker::skip_subtree`] prevents descent into a just-yielded directory,
//!   [`Walker::follow_symlink`] re-examines a just-yielded symlink through
//!   the link. The last directive issued for a node wins.
//! - [`NodeKind`] tags each node: pre-order and post-order directory visits,
//!   files, symlinks, dangling symlinks, detected cycles, and everything
//!   else (sockets, fifos, devices).
//! - [`WalkError`] describes I/O failures encountered while opening roots,
//!   reading directories, or querying metadata.
//!
//! # Invariants
//!
//! - Root nodes have depth `0`; a node's depth is the number of path
//!   components below its root.
//! - Every pre-order [`NodeKind::Dir`] node is paired with exactly one
//!   [`NodeKind::DirPost`] node, including directories that were skipped or
//!   sit on a foreign device.
//! - A directory whose identity is already on the active ancestor chain is
//!   reported once as [`NodeKind::Cycle`] and never entered, so traversal of
//!   a tree containing symlink cycles terminates.
//! - Iteration over an unchanged tree is deterministic.
//!
//! # Errors
//!
//! Opening fails when any root cannot be resolved. During iteration an I/O
//! failure terminates the walk with a [`WalkError`] carrying the offending
//! path; callers can reach the underlying [`std::io::Error`] through
//! [`std::error::Error::source`]. Two failure classes are expected on a
//! live system and tolerated instead: entries that vanish between listing
//! and inspection are skipped, and a directory that denies access reads as
//! empty (its own node has already been reported).
//!
//! # Examples
//!
//! ```
//! use walk::{NodeKind, WalkBuilder};
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! fs::create_dir(temp.path().join("sub"))?;
//! fs::write(temp.path().join("sub/data.txt"), b"data")?;
//!
//! let mut names = Vec::new();
//! for node in WalkBuilder::new(temp.path()).build()? {
//!     let node = node?;
//!     if node.kind() != NodeKind::DirPost {
//!         names.push(node.name().to_os_string());
//!     }
//! }
//! assert!(names.iter().any(|n| n == "data.txt"));
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod error;
mod node;
mod walker;

#[cfg(test)]
mod tests;

pub use crate::builder::WalkBuilder;
pub use crate::error::{WalkError, WalkErrorKind};
pub use crate::node::{NodeKind, WalkNode};
pub use crate::walker::Walker;
