use std::cmp::Ordering;
use std::collections::VecDeque;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::WalkError;
use crate::node::{NodeKind, WalkNode, device_of, node_name};

/// Depth-first iterator over filesystem nodes.
///
/// Directories are reported twice, in pre-order and post-order, and symlinks
/// are reported physically. After each yielded node the caller may issue a
/// directive for it before pulling the next node; see
/// [`Walker::skip_subtree`] and [`Walker::follow_symlink`].
pub struct Walker {
    roots: VecDeque<RootState>,
    stack: Vec<DirFrame>,
    last: Option<LastYield>,
    directive: Option<Directive>,
    cross_device: bool,
    finished: bool,
}

pub(crate) struct RootState {
    pub(crate) path: PathBuf,
    pub(crate) metadata: fs::Metadata,
    pub(crate) dev: Option<u64>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Directive {
    SkipSubtree,
    FollowSymlink,
}

struct DirFrame {
    path: PathBuf,
    metadata: fs::Metadata,
    names: Vec<OsString>,
    index: usize,
    depth: usize,
    identity: Identity,
    root_dev: Option<u64>,
}

impl DirFrame {
    fn next_name(&mut self) -> Option<OsString> {
        let name = self.names.get(self.index)?.clone();
        self.index += 1;
        Some(name)
    }
}

enum LastYield {
    Dir {
        path: PathBuf,
        metadata: fs::Metadata,
        depth: usize,
        identity: Identity,
        root_dev: Option<u64>,
        descend: bool,
    },
    Symlink {
        path: PathBuf,
        depth: usize,
        root_dev: Option<u64>,
    },
}

enum Step {
    Child {
        full: PathBuf,
        name: OsString,
        depth: usize,
        root_dev: Option<u64>,
    },
    Post,
    Root(RootState),
}

impl Walker {
    pub(crate) fn open(roots: VecDeque<RootState>, cross_device: bool) -> Self {
        Self {
            roots,
            stack: Vec::new(),
            last: None,
            directive: None,
            cross_device,
            finished: false,
        }
    }

    /// Requests that the most recently yielded directory not be descended
    /// into. Harmless on any other node kind; overrides an earlier
    /// [`Walker::follow_symlink`] for the same node.
    pub fn skip_subtree(&mut self) {
        self.directive = Some(Directive::SkipSubtree);
    }

    /// Requests that the most recently yielded symlink be re-examined through
    /// the link. The next call re-yields the same path as the target's node
    /// kind and, for directory targets, descends into it. Harmless on any
    /// other node kind; overridden by a later [`Walker::skip_subtree`].
    pub fn follow_symlink(&mut self) {
        self.directive = Some(Directive::FollowSymlink);
    }

    fn apply_last(&mut self) -> Option<Result<WalkNode, WalkError>> {
        let directive = self.directive.take();
        match self.last.take()? {
            LastYield::Dir {
                path,
                metadata,
                depth,
                identity,
                root_dev,
                descend,
            } => {
                let enter = descend && directive != Some(Directive::SkipSubtree);
                let names = if enter {
                    match read_dir_sorted(&path) {
                        Ok(names) => names,
                        Err(error) => {
                            self.finished = true;
                            return Some(Err(error));
                        }
                    }
                } else {
                    Vec::new()
                };
                self.stack.push(DirFrame {
                    path,
                    metadata,
                    names,
                    index: 0,
                    depth,
                    identity,
                    root_dev,
                });
                None
            }
            LastYield::Symlink {
                path,
                depth,
                root_dev,
            } => {
                if directive == Some(Directive::FollowSymlink) {
                    match self.follow(path, depth, root_dev) {
                        Ok(Some(node)) => Some(Ok(node)),
                        Ok(None) => None,
                        Err(error) => {
                            self.finished = true;
                            Some(Err(error))
                        }
                    }
                } else {
                    None
                }
            }
        }
    }

    /// Re-examines a symlink through the link after a follow directive.
    fn follow(
        &mut self,
        path: PathBuf,
        depth: usize,
        root_dev: Option<u64>,
    ) -> Result<Option<WalkNode>, WalkError> {
        let name = node_name(&path);
        match fs::metadata(&path) {
            Ok(metadata) => {
                let file_type = metadata.file_type();
                if file_type.is_dir() {
                    self.enter_directory(path, name, depth, metadata, root_dev)
                        .map(Some)
                } else if file_type.is_file() {
                    Ok(Some(WalkNode::new(
                        path,
                        name,
                        depth,
                        NodeKind::File,
                        metadata,
                    )))
                } else {
                    Ok(Some(WalkNode::new(
                        path,
                        name,
                        depth,
                        NodeKind::Other,
                        metadata,
                    )))
                }
            }
            Err(_) => {
                let metadata = match fs::symlink_metadata(&path) {
                    Ok(metadata) => metadata,
                    Err(error) if transient(&error) => return Ok(None),
                    Err(error) => return Err(WalkError::metadata(path.clone(), error)),
                };
                Ok(Some(WalkNode::new(
                    path,
                    name,
                    depth,
                    NodeKind::DanglingSymlink,
                    metadata,
                )))
            }
        }
    }

    fn enter_directory(
        &mut self,
        path: PathBuf,
        name: OsString,
        depth: usize,
        metadata: fs::Metadata,
        root_dev: Option<u64>,
    ) -> Result<WalkNode, WalkError> {
        let identity = Identity::of(&path, &metadata)?;
        if self.stack.iter().any(|frame| frame.identity == identity) {
            return Ok(WalkNode::new(path, name, depth, NodeKind::Cycle, metadata));
        }
        let descend = self.cross_device || root_dev.is_none() || device_of(&metadata) == root_dev;
        self.last = Some(LastYield::Dir {
            path: path.clone(),
            metadata: metadata.clone(),
            depth,
            identity,
            root_dev,
            descend,
        });
        Ok(WalkNode::new(path, name, depth, NodeKind::Dir, metadata))
    }

    /// Classifies one directory entry. Entries that vanish or become
    /// unreachable between listing and inspection are skipped (`Ok(None)`)
    /// rather than failing the walk.
    fn classify_child(
        &mut self,
        full: PathBuf,
        name: OsString,
        depth: usize,
        root_dev: Option<u64>,
    ) -> Result<Option<WalkNode>, WalkError> {
        let metadata = match fs::symlink_metadata(&full) {
            Ok(metadata) => metadata,
            Err(error) if transient(&error) => return Ok(None),
            Err(error) => return Err(WalkError::metadata(full.clone(), error)),
        };
        let file_type = metadata.file_type();
        if file_type.is_symlink() {
            self.last = Some(LastYield::Symlink {
                path: full.clone(),
                depth,
                root_dev,
            });
            return Ok(Some(WalkNode::new(
                full,
                name,
                depth,
                NodeKind::Symlink,
                metadata,
            )));
        }
        if file_type.is_dir() {
            return self
                .enter_directory(full, name, depth, metadata, root_dev)
                .map(Some);
        }
        let kind = if file_type.is_file() {
            NodeKind::File
        } else {
            NodeKind::Other
        };
        Ok(Some(WalkNode::new(full, name, depth, kind, metadata)))
    }

    fn yield_root(&mut self, root: RootState) -> Result<WalkNode, WalkError> {
        let RootState {
            path,
            metadata,
            dev,
        } = root;
        let name = node_name(&path);
        let file_type = metadata.file_type();
        if file_type.is_dir() {
            self.enter_directory(path, name, 0, metadata, dev)
        } else if file_type.is_file() {
            Ok(WalkNode::new(path, name, 0, NodeKind::File, metadata))
        } else {
            Ok(WalkNode::new(path, name, 0, NodeKind::Other, metadata))
        }
    }
}

impl Iterator for Walker {
    type Item = Result<WalkNode, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if let Some(result) = self.apply_last() {
            return Some(result);
        }

        loop {
            let step = if let Some(frame) = self.stack.last_mut() {
                if let Some(name) = frame.next_name() {
                    Step::Child {
                        full: frame.path.join(&name),
                        name,
                        depth: frame.depth + 1,
                        root_dev: frame.root_dev,
                    }
                } else {
                    Step::Post
                }
            } else if let Some(root) = self.roots.pop_front() {
                Step::Root(root)
            } else {
                self.finished = true;
                return None;
            };

            match step {
                Step::Child {
                    full,
                    name,
                    depth,
                    root_dev,
                } => match self.classify_child(full, name, depth, root_dev) {
                    Ok(Some(node)) => return Some(Ok(node)),
                    Ok(None) => {}
                    Err(error) => {
                        self.finished = true;
                        return Some(Err(error));
                    }
                },
                Step::Post => {
                    if let Some(frame) = self.stack.pop() {
                        let name = node_name(&frame.path);
                        return Some(Ok(WalkNode::new(
                            frame.path,
                            name,
                            frame.depth,
                            NodeKind::DirPost,
                            frame.metadata,
                        )));
                    }
                }
                Step::Root(root) => {
                    let result = self.yield_root(root);
                    if result.is_err() {
                        self.finished = true;
                    }
                    return Some(result);
                }
            }
        }
    }
}

#[cfg(unix)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Identity {
    dev: u64,
    ino: u64,
}

#[cfg(unix)]
impl Identity {
    #[allow(clippy::unnecessary_wraps)]
    fn of(_path: &Path, metadata: &fs::Metadata) -> Result<Self, WalkError> {
        use std::os::unix::fs::MetadataExt;
        Ok(Self {
            dev: metadata.dev(),
            ino: metadata.ino(),
        })
    }
}

#[cfg(not(unix))]
#[derive(Clone, Debug, Eq, PartialEq)]
struct Identity {
    canonical: PathBuf,
}

#[cfg(not(unix))]
impl Identity {
    fn of(path: &Path, _metadata: &fs::Metadata) -> Result<Self, WalkError> {
        Ok(Self {
            canonical: fs::canonicalize(path)
                .map_err(|error| WalkError::canonicalize(path.to_path_buf(), error))?,
        })
    }
}

/// Lists a directory in deterministic order. A directory that vanished or
/// denies access since it was classified reads as empty; its node has
/// already been reported, only its contents are unreachable.
fn read_dir_sorted(path: &Path) -> Result<Vec<OsString>, WalkError> {
    let read_dir = match fs::read_dir(path) {
        Ok(read_dir) => read_dir,
        Err(error) if transient(&error) => return Ok(Vec::new()),
        Err(error) => return Err(WalkError::read_dir(path.to_path_buf(), error)),
    };
    let mut names = Vec::new();
    for entry in read_dir {
        let entry =
            entry.map_err(|error| WalkError::read_dir_entry(path.to_path_buf(), error))?;
        names.push(entry.file_name());
    }
    names.sort_by(|a, b| compare_file_names(a, b));
    Ok(names)
}

/// Failures expected during a live walk: the entry disappeared, or this
/// process may not look at it.
fn transient(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
    )
}

/// Compares file names using platform-appropriate byte ordering so traversal
/// order is identical on every filesystem.
fn compare_file_names(left: &OsStr, right: &OsStr) -> Ordering {
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        left.as_bytes().cmp(right.as_bytes())
    }

    #[cfg(windows)]
    {
        use std::os::windows::ffi::OsStrExt;
        left.encode_wide().cmp(right.encode_wide())
    }

    #[cfg(not(any(unix, windows)))]
    {
        left.to_string_lossy().cmp(&right.to_string_lossy())
    }
}
