use std::borrow::Cow;
use std::ffi::OsString;
use std::path::PathBuf;

use defs::Behavior;
use entity::{CmpResult, Entity, Operation, ValueError, entity_cmp};
use fsdev::LocalDevs;
use matching::{PartialMatchResult, PartialPattern, PrefixHints};
use tracing::{debug, warn};
use walk::{NodeKind, WalkBuilder, WalkNode, Walker};

use crate::behaviors::{FileBehaviors, FilesystemScope, RecurseDirection};
use crate::entry::FtsEntry;
use crate::error::FtsError;

/// Synthetic multi-segment path a freshly compiled pruning pattern is
/// exercised against once before it is retained.
const PROBE_PATH: &str = "/f0o/bar/baz";

/// One filesystem traversal in progress.
///
/// A session is configured from exactly one of {path (+ optional filename),
/// filepath} entity values plus, in path mode, the object's behavior set.
/// It borrows the entities for its whole lifetime and owns everything else:
/// the walk cursor, the optional pruning automaton, and the optional
/// local-device index. Iterating yields matching [`FtsEntry`] values
/// lazily; the sequence is forward-only and finite.
pub struct Fts<'a> {
    walker: Walker,
    path_entity: Option<&'a Entity>,
    filename_entity: Option<&'a Entity>,
    filepath_entity: Option<&'a Entity>,
    path_op: Operation,
    pattern: Option<PartialPattern>,
    localdevs: Option<LocalDevs>,
    behaviors: Option<FileBehaviors>,
    finished: bool,
}

enum PruneAction {
    Proceed,
    SkipSubtree,
    NextNode,
}

impl<'a> Fts<'a> {
    /// Opens a traversal session.
    ///
    /// Exactly one of `path` and `filepath` must be supplied. In path mode
    /// the behavior set is parsed (`max_depth` and `recurse_direction` are
    /// required) and `filename` may further narrow the match; a nil
    /// filename entity is treated as absent, meaning the session matches
    /// directories instead of files. In filepath mode behaviors are ignored
    /// and no recursion policy applies.
    ///
    /// The walk is rooted at the literal path for the `equals` operation
    /// and at `/` for every other operation, because the match target
    /// cannot be known in advance. All owned resources are acquired before
    /// this returns; on error no partial session exists.
    pub fn open(
        path: Option<&'a Entity>,
        filename: Option<&'a Entity>,
        filepath: Option<&'a Entity>,
        behaviors: &[Behavior],
    ) -> Result<Self, FtsError> {
        let (source, file_behaviors) = match (path, filepath) {
            (Some(source), None) => (source, Some(FileBehaviors::from_behaviors(behaviors)?)),
            (None, Some(source)) => (source, None),
            _ => return Err(FtsError::ConflictingSource),
        };

        let path_op = source.operation();
        let path_value = source.string_value()?.to_owned();

        let filename_entity = match filename {
            Some(entity) if path.is_some() => match entity.string_value() {
                Ok(_) => Some(entity),
                Err(ValueError::Absent { .. }) => None,
                Err(error) => return Err(error.into()),
            },
            _ => None,
        };

        let pattern = if path_op == Operation::PatternMatch {
            compile_pruning_pattern(&path_value)?
        } else {
            None
        };

        let localdevs = match file_behaviors {
            Some(behaviors) if behaviors.filesystem() == FilesystemScope::Local => {
                Some(LocalDevs::scan()?)
            }
            _ => None,
        };

        let root = if path_op == Operation::Equals {
            PathBuf::from(&path_value)
        } else {
            PathBuf::from("/")
        };
        let cross_device = !matches!(
            file_behaviors.map(|behaviors| behaviors.filesystem()),
            Some(FilesystemScope::Defined)
        );
        let walker = WalkBuilder::new(root).cross_device(cross_device).build()?;

        Ok(Self {
            walker,
            path_entity: path,
            filename_entity,
            filepath_entity: filepath,
            path_op,
            pattern,
            localdevs,
            behaviors: file_behaviors,
            finished: false,
        })
    }

    /// Reports whether partial-match pruning is active for this session.
    #[must_use]
    pub fn prunes(&self) -> bool {
        self.pattern.is_some()
    }

    #[cfg(test)]
    pub(crate) fn disable_pruning(&mut self) {
        self.pattern = None;
    }

    /// Applies the partial-match pruning filter to a directory or symlink
    /// node, deciding whether the read loop proceeds to the match decision,
    /// cuts the subtree, or moves straight to the next node.
    fn prune(&mut self, node: &WalkNode) -> Result<PruneAction, FtsError> {
        let Some(pattern) = &self.pattern else {
            return Ok(PruneAction::Proceed);
        };
        if !matches!(node.kind(), NodeKind::Dir | NodeKind::Symlink) {
            return Ok(PruneAction::Proceed);
        }

        let subject = if self.filename_entity.is_some() {
            dir_prefix(node)
        } else {
            node.path().to_string_lossy().into_owned()
        };

        match pattern.partial_match(&subject) {
            Ok(PartialMatchResult::NoMatch) => {
                debug!(path = %node.path().display(), "no match possible, pruning subtree");
                Ok(PruneAction::SkipSubtree)
            }
            Ok(PartialMatchResult::Partial) => {
                // A symlink's own name can never satisfy a still-growing
                // pattern, so it is followed instead of reported.
                if node.kind() == NodeKind::Symlink {
                    self.walker.follow_symlink();
                }
                debug!(path = %node.path().display(), "partial match, continuing");
                Ok(PruneAction::NextNode)
            }
            Ok(PartialMatchResult::Match) => Ok(PruneAction::Proceed),
            Err(error) => Err(FtsError::Eval(error)),
        }
    }

    /// The match decision: does this node produce an entry?
    fn match_node(&self, node: &WalkNode) -> Option<FtsEntry> {
        if node.kind() == NodeKind::Symlink {
            debug!(path = %node.path().display(), "only the target of a symlink gets reported");
            return None;
        }

        if let Some(filepath_entity) = self.filepath_entity {
            if node.kind() == NodeKind::Dir {
                return None;
            }
            let subject = node.path().to_string_lossy();
            if entity_cmp(filepath_entity, &subject) == CmpResult::True {
                return Some(FtsEntry::full(node.path().to_path_buf()));
            }
            return None;
        }

        let path_entity = self.path_entity?;
        let is_dir = node.kind() == NodeKind::Dir;

        if let Some(filename_entity) = self.filename_entity {
            if is_dir {
                return None;
            }
            let prefix = dir_prefix(node);
            // equals relies on the walk being rooted at the literal path;
            // the prefix comparison is overridden by design.
            let matched = self.path_op == Operation::Equals
                || entity_cmp(path_entity, &prefix) == CmpResult::True;
            if !matched {
                return None;
            }
            let name = name_subject(node);
            if entity_cmp(filename_entity, &name) != CmpResult::True {
                return None;
            }
            Some(FtsEntry::split(
                PathBuf::from(prefix),
                OsString::from(name.into_owned()),
            ))
        } else {
            if !is_dir {
                return None;
            }
            let subject = node.path().to_string_lossy();
            let matched = self.path_op == Operation::Equals
                || entity_cmp(path_entity, &subject) == CmpResult::True;
            if matched {
                Some(FtsEntry::full(node.path().to_path_buf()))
            } else {
                None
            }
        }
    }

    /// The recursion directive: decides, independently of the match
    /// outcome, whether the walk descends past this node.
    fn apply_recursion_policy(&mut self, node: &WalkNode) {
        let Some(behaviors) = self.behaviors else {
            // filepath mode parses no behaviors and applies no skips
            return;
        };
        match behaviors.direction() {
            RecurseDirection::None => {
                if self.path_op != Operation::Equals {
                    return;
                }
                if self.filename_entity.is_none() && self.filepath_entity.is_none() {
                    debug!(path = %node.path().display(), "directory target without recursion, skipping subtree");
                    self.walker.skip_subtree();
                } else if node.depth() > 0 {
                    debug!(path = %node.path().display(), "no recursion below the starting path");
                    self.walker.skip_subtree();
                }
            }
            RecurseDirection::Down => self.apply_down_policy(behaviors, node),
            RecurseDirection::Up => {
                // No upward walk is performed; everything beyond the root
                // is skipped.
                self.walker.skip_subtree();
            }
        }
    }

    fn apply_down_policy(&mut self, behaviors: FileBehaviors, node: &WalkNode) {
        if node.depth() == 0 && self.filename_entity.is_some() {
            // the root must be visited to find the children
            return;
        }

        let within_limit = behaviors.max_depth() == -1
            || i64::try_from(node.depth()).unwrap_or(i64::MAX)
                <= i64::from(behaviors.max_depth());
        if !within_limit {
            debug!(
                path = %node.path().display(),
                max_depth = behaviors.max_depth(),
                "max depth reached, skipping subtree"
            );
            self.walker.skip_subtree();
            return;
        }

        match node.kind() {
            NodeKind::Dir => {
                if !behaviors.recurse().directories() {
                    self.walker.skip_subtree();
                    return;
                }
            }
            NodeKind::Symlink => {
                if !behaviors.recurse().symlinks() {
                    self.walker.skip_subtree();
                    return;
                }
                self.walker.follow_symlink();
            }
            // The filesystem boundary is only checked for nodes recursion
            // passes through.
            _ => return,
        }

        if behaviors.filesystem() == FilesystemScope::Local {
            if let Some(localdevs) = &self.localdevs {
                let local = node.device_id().map_or_else(
                    || localdevs.contains_path(node.path()),
                    |dev| localdevs.contains_dev(dev),
                );
                if !local {
                    debug!(path = %node.path().display(), "not on a local filesystem, skipping subtree");
                    self.walker.skip_subtree();
                }
            }
        }
    }
}

impl Iterator for Fts<'_> {
    type Item = Result<FtsEntry, FtsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let node = match self.walker.next() {
                Some(Ok(node)) => node,
                Some(Err(error)) => {
                    self.finished = true;
                    return Some(Err(error.into()));
                }
                None => {
                    self.finished = true;
                    return None;
                }
            };

            match node.kind() {
                NodeKind::DirPost => continue,
                NodeKind::Cycle => {
                    warn!(path = %node.path().display(), "filesystem tree cycle detected");
                    continue;
                }
                _ => {}
            }

            match self.prune(&node) {
                Ok(PruneAction::Proceed) => {}
                Ok(PruneAction::SkipSubtree) => {
                    self.walker.skip_subtree();
                    continue;
                }
                Ok(PruneAction::NextNode) => continue,
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            }

            let entry = self.match_node(&node);
            self.apply_recursion_policy(&node);

            if let Some(entry) = entry {
                return Some(Ok(entry));
            }
        }
    }
}

fn compile_pruning_pattern(pattern: &str) -> Result<Option<PartialPattern>, FtsError> {
    let compiled = PartialPattern::compile(pattern)?;
    let hints = PrefixHints::of(pattern)?;
    if !hints.supports_pruning() {
        debug!(pattern, "pattern is not prefix-bound, partial-match pruning disabled");
        return Ok(None);
    }
    // A representative probe; an engine failure here demotes the session to
    // comparison-only filtering instead of failing it.
    match compiled.partial_match(PROBE_PATH) {
        Ok(_) => {
            debug!(pattern, "partial-match pruning enabled");
            Ok(Some(compiled))
        }
        Err(error) => {
            debug!(pattern, %error, "probe failed, partial-match pruning disabled");
            Ok(None)
        }
    }
}

/// The path prefix a node is matched against when filenames are tracked
/// separately: the full path for a root node, the parent directory
/// otherwise.
fn dir_prefix(node: &WalkNode) -> String {
    if node.depth() == 0 {
        return node.path().to_string_lossy().into_owned();
    }
    match node.path().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_string_lossy().into_owned(),
        _ => node.path().to_string_lossy().into_owned(),
    }
}

/// The string a node's name is compared against: root nodes are known by
/// their full path.
fn name_subject(node: &WalkNode) -> Cow<'_, str> {
    if node.depth() == 0 {
        node.path().to_string_lossy()
    } else {
        node.name().to_string_lossy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    /// Builds a pattern-match session rooted at `root` instead of `/` so the
    /// walk stays inside the test fixture.
    fn pattern_session<'a>(path: &'a Entity, root: &Path) -> Fts<'a> {
        let value = path.string_value().expect("pattern value");
        let pattern = compile_pruning_pattern(value).expect("pruning pattern");
        let behaviors = [
            Behavior::new("max_depth", "-1"),
            Behavior::new("recurse_direction", "down"),
        ];
        Fts {
            walker: WalkBuilder::new(root).build().expect("walker"),
            path_entity: Some(path),
            filename_entity: None,
            filepath_entity: None,
            path_op: Operation::PatternMatch,
            pattern,
            localdevs: None,
            behaviors: Some(FileBehaviors::from_behaviors(&behaviors).expect("behaviors")),
            finished: false,
        }
    }

    fn collect(session: Fts<'_>) -> Vec<FtsEntry> {
        session
            .collect::<Result<Vec<_>, _>>()
            .expect("session entries")
    }

    #[test]
    fn pruning_never_changes_the_result_set() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();
        fs::create_dir_all(root.join("x/sub")).expect("tree");
        fs::create_dir_all(root.join("x/other")).expect("tree");
        fs::create_dir_all(root.join("y/sub2")).expect("tree");
        fs::write(root.join("x/sub/data.txt"), b"data").expect("write");

        let pattern = format!("^{}/x/.*", root.display());
        let path = Entity::text("path", &pattern, Operation::PatternMatch);

        let pruned_session = pattern_session(&path, root);
        assert!(pruned_session.prunes());
        let pruned = collect(pruned_session);

        let mut unpruned_session = pattern_session(&path, root);
        unpruned_session.disable_pruning();
        let unpruned = collect(unpruned_session);

        assert_eq!(pruned, unpruned);
        let paths: Vec<_> = pruned.iter().map(|e| e.path().to_path_buf()).collect();
        assert!(paths.contains(&root.join("x/sub")));
        assert!(paths.contains(&root.join("x/other")));
        assert!(!paths.iter().any(|p| p.starts_with(root.join("y"))));
    }

    #[test]
    fn unanchored_patterns_are_not_retained_for_pruning() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = Entity::text("path", "sub$", Operation::PatternMatch);
        let session = pattern_session(&path, temp.path());
        assert!(!session.prunes());
    }

    #[test]
    fn dir_prefix_splits_children_and_keeps_roots_whole() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join("a"), b"x").expect("write");

        let mut walker = WalkBuilder::new(temp.path()).build().expect("walker");
        let root = walker.next().expect("root").expect("root ok");
        assert_eq!(dir_prefix(&root), temp.path().to_string_lossy());

        let child = walker.next().expect("child").expect("child ok");
        assert_eq!(dir_prefix(&child), temp.path().to_string_lossy());
        assert_eq!(name_subject(&child), "a");
    }
}
