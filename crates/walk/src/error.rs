use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error returned when traversal fails.
#[derive(Debug)]
pub struct WalkError {
    kind: WalkErrorKind,
}

impl WalkError {
    fn new(kind: WalkErrorKind) -> Self {
        Self { kind }
    }

    pub(crate) fn root_metadata(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::RootMetadata { path, source })
    }

    pub(crate) fn read_dir(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::ReadDir { path, source })
    }

    pub(crate) fn read_dir_entry(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::ReadDirEntry { path, source })
    }

    pub(crate) fn metadata(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::Metadata { path, source })
    }

    #[cfg_attr(unix, allow(dead_code))]
    pub(crate) fn canonicalize(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::Canonicalize { path, source })
    }

    /// Returns the specific failure that terminated traversal.
    #[must_use]
    pub fn kind(&self) -> &WalkErrorKind {
        &self.kind
    }
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WalkErrorKind::RootMetadata { path, source } => {
                write!(
                    f,
                    "failed to resolve traversal root '{}': {}",
                    path.display(),
                    source
                )
            }
            WalkErrorKind::ReadDir { path, source } => {
                write!(
                    f,
                    "failed to read directory '{}': {}",
                    path.display(),
                    source
                )
            }
            WalkErrorKind::ReadDirEntry { path, source } => {
                write!(
                    f,
                    "failed to read entry in '{}': {}",
                    path.display(),
                    source
                )
            }
            WalkErrorKind::Metadata { path, source } => {
                write!(
                    f,
                    "failed to inspect metadata for '{}': {}",
                    path.display(),
                    source
                )
            }
            WalkErrorKind::Canonicalize { path, source } => {
                write!(f, "failed to canonicalize '{}': {}", path.display(), source)
            }
        }
    }
}

impl Error for WalkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            WalkErrorKind::RootMetadata { source, .. }
            | WalkErrorKind::ReadDir { source, .. }
            | WalkErrorKind::ReadDirEntry { source, .. }
            | WalkErrorKind::Metadata { source, .. }
            | WalkErrorKind::Canonicalize { source, .. } => Some(source),
        }
    }
}

/// Classification of traversal failures.
#[derive(Debug)]
pub enum WalkErrorKind {
    /// A traversal root could not be resolved.
    RootMetadata {
        /// Root path that failed to resolve.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to read the contents of a directory.
    ReadDir {
        /// Directory whose contents could not be read.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to obtain a directory entry during iteration.
    ReadDirEntry {
        /// Directory containing the problematic entry.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to retrieve metadata for an entry.
    Metadata {
        /// Path whose metadata could not be retrieved.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to canonicalize a path while computing node identity.
    Canonicalize {
        /// Path that failed to canonicalize.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
}
