use defs::Behavior;

use crate::error::FtsError;

const MAX_DEPTH: &str = "max_depth";
const RECURSE_DIRECTION: &str = "recurse_direction";
const RECURSE: &str = "recurse";
const RECURSE_FILE_SYSTEM: &str = "recurse_file_system";

/// Which way recursion proceeds from the starting path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecurseDirection {
    /// No recursion: only the starting path (and, when a filename is
    /// tracked, the files directly inside it) is examined.
    None,
    /// Recurse into the tree below the starting path.
    Down,
    /// Recurse toward the filesystem root. No upward walk is actually
    /// performed; everything beyond the starting path is skipped.
    Up,
}

impl RecurseDirection {
    fn from_text(text: &str) -> Option<Self> {
        match text {
            "none" => Some(Self::None),
            "down" => Some(Self::Down),
            "up" => Some(Self::Up),
            _ => None,
        }
    }
}

/// Which node kinds recursion descends through.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecurseKind {
    /// Descend through symlinks only.
    Symlinks,
    /// Descend through directories only.
    Directories,
    /// Descend through both (the schema default).
    SymlinksAndDirectories,
    /// Descend through directories; symlinks are not followed.
    FilesAndDirectories,
}

impl RecurseKind {
    fn from_text(text: &str) -> Option<Self> {
        match text {
            "symlinks" => Some(Self::Symlinks),
            "directories" => Some(Self::Directories),
            "symlinks and directories" => Some(Self::SymlinksAndDirectories),
            "files and directories" => Some(Self::FilesAndDirectories),
            _ => None,
        }
    }

    /// True when directories are descended into.
    #[must_use]
    pub const fn directories(self) -> bool {
        matches!(
            self,
            Self::Directories | Self::SymlinksAndDirectories | Self::FilesAndDirectories
        )
    }

    /// True when symlinks are followed.
    #[must_use]
    pub const fn symlinks(self) -> bool {
        matches!(self, Self::Symlinks | Self::SymlinksAndDirectories)
    }
}

/// Which filesystems recursion may reach.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FilesystemScope {
    /// Only local filesystems; checked against the mount-table index.
    Local,
    /// Any filesystem (the schema default).
    All,
    /// Only the filesystem of the starting path; enforced natively by the
    /// walk cursor.
    Defined,
}

impl FilesystemScope {
    fn from_text(text: &str) -> Option<Self> {
        match text {
            "local" => Some(Self::Local),
            "all" => Some(Self::All),
            "defined" => Some(Self::Defined),
            _ => None,
        }
    }
}

/// Parsed behavior set of a filesystem object.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FileBehaviors {
    max_depth: i32,
    direction: RecurseDirection,
    recurse: RecurseKind,
    filesystem: FilesystemScope,
}

impl FileBehaviors {
    /// Extracts the traversal configuration from an object's behavior list.
    ///
    /// `max_depth` and `recurse_direction` are required; `recurse` defaults
    /// to "symlinks and directories" and `recurse_file_system` to "all" when
    /// absent. Malformed values are fatal, never coerced.
    pub fn from_behaviors(behaviors: &[Behavior]) -> Result<Self, FtsError> {
        let raw_depth = lookup(behaviors, MAX_DEPTH)
            .ok_or(FtsError::MissingBehavior { key: MAX_DEPTH })?;
        let max_depth = raw_depth
            .trim()
            .parse::<i32>()
            .map_err(|_| FtsError::Behavior {
                key: MAX_DEPTH,
                value: raw_depth.to_owned(),
            })?;

        let raw_direction = lookup(behaviors, RECURSE_DIRECTION).ok_or(FtsError::MissingBehavior {
            key: RECURSE_DIRECTION,
        })?;
        let direction =
            RecurseDirection::from_text(raw_direction).ok_or_else(|| FtsError::Behavior {
                key: RECURSE_DIRECTION,
                value: raw_direction.to_owned(),
            })?;

        let recurse = match lookup(behaviors, RECURSE) {
            Some(raw) => RecurseKind::from_text(raw).ok_or_else(|| FtsError::Behavior {
                key: RECURSE,
                value: raw.to_owned(),
            })?,
            None => RecurseKind::SymlinksAndDirectories,
        };

        let filesystem = match lookup(behaviors, RECURSE_FILE_SYSTEM) {
            Some(raw) => FilesystemScope::from_text(raw).ok_or_else(|| FtsError::Behavior {
                key: RECURSE_FILE_SYSTEM,
                value: raw.to_owned(),
            })?,
            None => FilesystemScope::All,
        };

        Ok(Self {
            max_depth,
            direction,
            recurse,
            filesystem,
        })
    }

    /// Maximum recursion depth; `-1` means unlimited.
    #[must_use]
    pub const fn max_depth(&self) -> i32 {
        self.max_depth
    }

    /// Recursion direction.
    #[must_use]
    pub const fn direction(&self) -> RecurseDirection {
        self.direction
    }

    /// Node kinds recursion descends through.
    #[must_use]
    pub const fn recurse(&self) -> RecurseKind {
        self.recurse
    }

    /// Filesystem scope of the recursion.
    #[must_use]
    pub const fn filesystem(&self) -> FilesystemScope {
        self.filesystem
    }
}

fn lookup<'b>(behaviors: &'b [Behavior], key: &str) -> Option<&'b str> {
    behaviors
        .iter()
        .find(|behavior| behavior.key() == key)
        .map(Behavior::value)
}
