use defs::Behavior;
use entity::{Entity, EntityValue, Operation};

use crate::{FileBehaviors, FilesystemScope, Fts, FtsError, RecurseDirection, RecurseKind};

fn down_behaviors() -> Vec<Behavior> {
    vec![
        Behavior::new("max_depth", "-1"),
        Behavior::new("recurse_direction", "down"),
    ]
}

#[test]
fn behaviors_apply_schema_defaults() {
    let parsed = FileBehaviors::from_behaviors(&down_behaviors()).expect("parse");
    assert_eq!(parsed.max_depth(), -1);
    assert_eq!(parsed.direction(), RecurseDirection::Down);
    assert_eq!(parsed.recurse(), RecurseKind::SymlinksAndDirectories);
    assert_eq!(parsed.filesystem(), FilesystemScope::All);
}

#[test]
fn behaviors_require_max_depth_and_direction() {
    let missing_depth = [Behavior::new("recurse_direction", "down")];
    assert!(matches!(
        FileBehaviors::from_behaviors(&missing_depth),
        Err(FtsError::MissingBehavior { key: "max_depth" })
    ));

    let missing_direction = [Behavior::new("max_depth", "3")];
    assert!(matches!(
        FileBehaviors::from_behaviors(&missing_direction),
        Err(FtsError::MissingBehavior {
            key: "recurse_direction"
        })
    ));
}

#[test]
fn behaviors_reject_malformed_values() {
    let bad_depth = [
        Behavior::new("max_depth", "deep"),
        Behavior::new("recurse_direction", "down"),
    ];
    assert!(matches!(
        FileBehaviors::from_behaviors(&bad_depth),
        Err(FtsError::Behavior { key: "max_depth", .. })
    ));

    let bad_direction = [
        Behavior::new("max_depth", "0"),
        Behavior::new("recurse_direction", "sideways"),
    ];
    assert!(matches!(
        FileBehaviors::from_behaviors(&bad_direction),
        Err(FtsError::Behavior {
            key: "recurse_direction",
            ..
        })
    ));

    let bad_recurse = [
        Behavior::new("max_depth", "0"),
        Behavior::new("recurse_direction", "down"),
        Behavior::new("recurse", "everything"),
    ];
    assert!(matches!(
        FileBehaviors::from_behaviors(&bad_recurse),
        Err(FtsError::Behavior { key: "recurse", .. })
    ));

    let bad_scope = [
        Behavior::new("max_depth", "0"),
        Behavior::new("recurse_direction", "down"),
        Behavior::new("recurse_file_system", "remote"),
    ];
    assert!(matches!(
        FileBehaviors::from_behaviors(&bad_scope),
        Err(FtsError::Behavior {
            key: "recurse_file_system",
            ..
        })
    ));
}

#[test]
fn recurse_kinds_expose_their_members() {
    assert!(RecurseKind::SymlinksAndDirectories.directories());
    assert!(RecurseKind::SymlinksAndDirectories.symlinks());
    assert!(RecurseKind::Directories.directories());
    assert!(!RecurseKind::Directories.symlinks());
    assert!(RecurseKind::Symlinks.symlinks());
    assert!(!RecurseKind::Symlinks.directories());
    assert!(RecurseKind::FilesAndDirectories.directories());
    assert!(!RecurseKind::FilesAndDirectories.symlinks());
}

#[test]
fn open_requires_exactly_one_source() {
    let path = Entity::text("path", "/tmp", Operation::Equals);
    let filepath = Entity::text("filepath", "/tmp/a", Operation::Equals);
    let behaviors = down_behaviors();

    assert!(matches!(
        Fts::open(Some(&path), None, Some(&filepath), &behaviors),
        Err(FtsError::ConflictingSource)
    ));
    assert!(matches!(
        Fts::open(None, None, None, &behaviors),
        Err(FtsError::ConflictingSource)
    ));
}

#[test]
fn open_rejects_malformed_path_entities() {
    let path = Entity::new("path", EntityValue::Int(7), Operation::Equals);
    assert!(matches!(
        Fts::open(Some(&path), None, None, &down_behaviors()),
        Err(FtsError::Value(_))
    ));
}

#[test]
fn open_rejects_malformed_filename_entities() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = Entity::text("path", temp.path().to_string_lossy(), Operation::Equals);
    let filename = Entity::new("filename", EntityValue::Bool(true), Operation::Equals);
    assert!(matches!(
        Fts::open(Some(&path), Some(&filename), None, &down_behaviors()),
        Err(FtsError::Value(_))
    ));
}

#[test]
fn open_treats_nil_filename_as_directory_match() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = Entity::text("path", temp.path().to_string_lossy(), Operation::Equals);
    let filename = Entity::nil("filename");
    let behaviors = [
        Behavior::new("max_depth", "-1"),
        Behavior::new("recurse_direction", "none"),
    ];

    let session =
        Fts::open(Some(&path), Some(&filename), None, &behaviors).expect("session opens");
    let entries: Vec<_> = session.collect::<Result<_, _>>().expect("entries");
    // The directory itself is the single match.
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path(), temp.path());
    assert!(entries[0].filename().is_none());
}

#[test]
fn open_fails_when_the_root_does_not_exist() {
    let path = Entity::text("path", "/nonexistent/fts/root", Operation::Equals);
    assert!(matches!(
        Fts::open(Some(&path), None, None, &down_behaviors()),
        Err(FtsError::Walk(_))
    ));
}

#[test]
fn open_rejects_uncompilable_patterns() {
    let path = Entity::text("path", "^/tmp/(", Operation::PatternMatch);
    assert!(matches!(
        Fts::open(Some(&path), None, None, &down_behaviors()),
        Err(FtsError::Pattern(_))
    ));
}

#[test]
fn behaviors_are_ignored_in_filepath_mode() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("present");
    std::fs::write(&file, b"x").expect("write");
    let filepath = Entity::text("filepath", file.to_string_lossy(), Operation::Equals);

    // No behaviors at all; filepath mode must not require them.
    let session = Fts::open(None, None, Some(&filepath), &[]).expect("session opens");
    let entries: Vec<_> = session.collect::<Result<_, _>>().expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path(), file);
    assert!(entries[0].filename().is_none());
}
