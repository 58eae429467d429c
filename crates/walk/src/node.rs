use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

/// Classification of a visited filesystem node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeKind {
    /// A directory visited in pre-order, before any of its children.
    Dir,
    /// A directory visited in post-order, after all of its children.
    DirPost,
    /// A regular file.
    File,
    /// A symbolic link, reported physically.
    Symlink,
    /// A symbolic link whose target could not be resolved after a follow
    /// directive.
    DanglingSymlink,
    /// A directory that is already on the active ancestor chain; it is
    /// reported once and never entered.
    Cycle,
    /// Any other node type (socket, fifo, device, ...).
    Other,
}

/// One visited filesystem node.
#[derive(Debug)]
pub struct WalkNode {
    path: PathBuf,
    name: OsString,
    depth: usize,
    kind: NodeKind,
    metadata: fs::Metadata,
}

impl WalkNode {
    pub(crate) fn new(
        path: PathBuf,
        name: OsString,
        depth: usize,
        kind: NodeKind,
        metadata: fs::Metadata,
    ) -> Self {
        Self {
            path,
            name,
            depth,
            kind,
            metadata,
        }
    }

    /// Returns the full path of the node.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the final path component, or the root path itself for a root
    /// node without one.
    #[must_use]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Reports the depth below the node's root (roots are at depth `0`).
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the node classification.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Provides the [`fs::Metadata`] captured for the node. Followed nodes
    /// carry the metadata of the link target, all others the physical one.
    #[must_use]
    pub fn metadata(&self) -> &fs::Metadata {
        &self.metadata
    }

    /// Returns the device id the node resides on, where the platform exposes
    /// one.
    #[must_use]
    pub fn device_id(&self) -> Option<u64> {
        device_of(&self.metadata)
    }
}

#[cfg(unix)]
pub(crate) fn device_of(metadata: &fs::Metadata) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;
    Some(metadata.dev())
}

#[cfg(not(unix))]
pub(crate) fn device_of(_metadata: &fs::Metadata) -> Option<u64> {
    None
}

pub(crate) fn node_name(path: &Path) -> OsString {
    path.file_name()
        .map_or_else(|| path.as_os_str().to_os_string(), OsStr::to_os_string)
}
