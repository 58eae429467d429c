#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `fsdev` answers one question for the filesystem probes: does a given
//! device or path live on a local filesystem? The index is built once from
//! the live mount table and never refreshed, so a traversal session sees a
//! consistent view of the machine for its whole lifetime.
//!
//! # Design
//!
//! - [`LocalDevs::scan`] parses `/proc/self/mounts`, drops every mount whose
//!   filesystem type is a known network filesystem, stats the surviving
//!   mount points, and records their device ids in a sorted table.
//! - [`LocalDevs::contains_dev`] is a binary search over that table;
//!   [`LocalDevs::contains_path`] stats the path first and then searches.
//! - [`LocalDevs::with_filesystems`] restricts the scan to an explicit
//!   filesystem-type set instead of the "everything not known to be remote"
//!   default.
//!
//! # Errors
//!
//! Construction fails with [`FsDevError`] when the mount table cannot be
//! read or yields no usable mounts. Lookups never fail: a path that cannot
//! be stat'ed is simply not local.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Filesystem types that are never local, no matter how they are mounted.
const REMOTE_FS_TYPES: &[&str] = &[
    "afs", "cifs", "coda", "fuse.sshfs", "ncpfs", "nfs", "nfs4", "smbfs", "sshfs", "9p",
];

/// Index of device ids belonging to local filesystems.
#[derive(Clone, Debug)]
pub struct LocalDevs {
    devs: Vec<u64>,
}

impl LocalDevs {
    /// Builds the index from the live mount table, keeping every mount whose
    /// filesystem type is not a known network filesystem.
    pub fn scan() -> Result<Self, FsDevError> {
        Self::scan_filtered(None)
    }

    /// Builds the index from the live mount table, keeping only mounts whose
    /// filesystem type appears in `types`.
    pub fn with_filesystems(types: &[&str]) -> Result<Self, FsDevError> {
        Self::scan_filtered(Some(types))
    }

    #[cfg(unix)]
    fn scan_filtered(types: Option<&[&str]>) -> Result<Self, FsDevError> {
        let table = fs::read_to_string(MOUNT_TABLE)
            .map_err(|source| FsDevError::MountTable { source })?;
        let mounts = mount_points(&table, types);
        Self::from_mount_points(&mounts)
    }

    #[cfg(not(unix))]
    fn scan_filtered(_types: Option<&[&str]>) -> Result<Self, FsDevError> {
        Err(FsDevError::Unsupported)
    }

    /// Builds the index from an explicit set of mount points, stat'ing each
    /// one for its device id. Mount points that cannot be stat'ed are
    /// skipped.
    pub fn from_mount_points<P: AsRef<Path>>(mounts: &[P]) -> Result<Self, FsDevError> {
        let mut devs = Vec::with_capacity(mounts.len());
        for mount in mounts {
            let mount = mount.as_ref();
            match device_of_path(mount) {
                Some(dev) => devs.push(dev),
                None => debug!(mount = %mount.display(), "mount point not stat'able, skipped"),
            }
        }
        devs.sort_unstable();
        devs.dedup();
        if devs.is_empty() {
            return Err(FsDevError::NoUsableMounts);
        }
        Ok(Self { devs })
    }

    /// Reports whether the raw device id belongs to a local filesystem.
    #[must_use]
    pub fn contains_dev(&self, dev: u64) -> bool {
        self.devs.binary_search(&dev).is_ok()
    }

    /// Reports whether the path resides on a local filesystem. A path that
    /// cannot be stat'ed is not local.
    #[must_use]
    pub fn contains_path(&self, path: &Path) -> bool {
        device_of_path(path).is_some_and(|dev| self.contains_dev(dev))
    }

    /// Number of distinct local devices in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devs.len()
    }

    /// Reports whether the index holds no devices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devs.is_empty()
    }
}

#[cfg(unix)]
const MOUNT_TABLE: &str = "/proc/self/mounts";

/// Extracts the mount points to index from mount-table text. With no
/// explicit type set, everything not in [`REMOTE_FS_TYPES`] is kept.
fn mount_points(table: &str, types: Option<&[&str]>) -> Vec<PathBuf> {
    let mut mounts = Vec::new();
    for line in table.lines() {
        let mut fields = line.split_whitespace();
        let Some(_device) = fields.next() else {
            continue;
        };
        let Some(mount_point) = fields.next() else {
            continue;
        };
        let Some(fs_type) = fields.next() else {
            continue;
        };
        let keep = match types {
            Some(types) => types.contains(&fs_type),
            None => !REMOTE_FS_TYPES.contains(&fs_type),
        };
        if keep {
            mounts.push(PathBuf::from(unescape_mount_point(mount_point)));
        } else {
            debug!(mount = mount_point, fs_type, "mount excluded from local set");
        }
    }
    mounts
}

/// Decodes the octal escapes getmntent-style mount tables use for
/// whitespace in mount point paths.
fn unescape_mount_point(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escape: String = chars.by_ref().take(3).collect();
        match escape.as_str() {
            "040" => out.push(' '),
            "011" => out.push('\t'),
            "012" => out.push('\n'),
            "134" => out.push('\\'),
            other => {
                out.push('\\');
                out.push_str(other);
            }
        }
    }
    out
}

#[cfg(unix)]
fn device_of_path(path: &Path) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;
    fs::metadata(path).ok().map(|metadata| metadata.dev())
}

#[cfg(not(unix))]
fn device_of_path(_path: &Path) -> Option<u64> {
    None
}

/// Error raised while building the local-device index.
#[derive(Debug, thiserror::Error)]
pub enum FsDevError {
    /// The mount table could not be read.
    #[error("failed to read the mount table")]
    MountTable {
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
    /// The mount table yielded no mount point with a resolvable device id.
    #[error("mount table yielded no usable local mounts")]
    NoUsableMounts,
    /// The platform exposes no mount table to scan.
    #[error("local device indexing is not supported on this platform")]
    Unsupported,
}
