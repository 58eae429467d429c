use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

use crate::error::WalkError;
use crate::node::device_of;
use crate::walker::{RootState, Walker};

/// Configures a filesystem traversal over one or more root paths.
#[derive(Clone, Debug)]
pub struct WalkBuilder {
    roots: Vec<PathBuf>,
    cross_device: bool,
}

impl WalkBuilder {
    /// Creates a new builder that will traverse the provided root path.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            roots: vec![root.into()],
            cross_device: true,
        }
    }

    /// Adds another root path; roots are traversed in the order given.
    #[must_use]
    pub fn add_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Configures whether descent may cross filesystem boundaries.
    ///
    /// When disabled, a directory on a different device than the root it was
    /// reached from is still reported but never entered.
    #[must_use]
    pub const fn cross_device(mut self, allow: bool) -> Self {
        self.cross_device = allow;
        self
    }

    /// Builds a [`Walker`] using the configured options.
    ///
    /// Every root is resolved eagerly; a root that cannot be resolved fails
    /// the build, so no partially opened walker is ever returned. A root that
    /// names a symlink is resolved through the link.
    pub fn build(self) -> Result<Walker, WalkError> {
        let mut roots = VecDeque::with_capacity(self.roots.len());
        for path in self.roots {
            let path = absolutize(path)?;
            let metadata = fs::metadata(&path)
                .map_err(|error| WalkError::root_metadata(path.clone(), error))?;
            let dev = device_of(&metadata);
            roots.push_back(RootState {
                path,
                metadata,
                dev,
            });
        }
        Ok(Walker::open(roots, self.cross_device))
    }
}

fn absolutize(path: PathBuf) -> Result<PathBuf, WalkError> {
    if path.is_absolute() {
        Ok(path)
    } else {
        let cwd = std::env::current_dir()
            .map_err(|error| WalkError::root_metadata(PathBuf::from("."), error))?;
        Ok(cwd.join(path))
    }
}
