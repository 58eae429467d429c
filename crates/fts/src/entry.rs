use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// One reported match of a traversal session.
///
/// When the session tracks filenames separately (path+filename mode with a
/// filename entity), `path` is the directory component and `filename` the
/// matched name. Otherwise `path` is the full matched path and `filename`
/// is absent. Entries carry no reference back to their session and outlive
/// it freely.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FtsEntry {
    path: PathBuf,
    filename: Option<OsString>,
}

impl FtsEntry {
    pub(crate) fn full(path: PathBuf) -> Self {
        Self {
            path,
            filename: None,
        }
    }

    pub(crate) fn split(path: PathBuf, filename: OsString) -> Self {
        Self {
            path,
            filename: Some(filename),
        }
    }

    /// The directory component when a filename is tracked separately,
    /// otherwise the full matched path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The matched filename, present iff the session tracks filenames
    /// separately.
    #[must_use]
    pub fn filename(&self) -> Option<&OsStr> {
        self.filename.as_deref()
    }
}
