use entity::ValueError;
use fsdev::FsDevError;
use matching::PatternError;
use walk::WalkError;

/// Error raised while opening or reading a traversal session.
///
/// Every variant except [`FtsError::Eval`] belongs to session
/// initialization: [`crate::Fts::open`] returns it immediately and no
/// partial session exists afterwards. [`FtsError::Eval`] is produced during
/// iteration when the pruning engine fails mid-walk; it ends the session,
/// and the final `Err` item distinguishes error exhaustion from a cleanly
/// drained sequence.
#[derive(Debug, thiserror::Error)]
pub enum FtsError {
    /// Exactly one of path and filepath must be supplied.
    #[error("exactly one of path and filepath must be supplied")]
    ConflictingSource,
    /// A required entity value was absent or carried the wrong payload type.
    #[error(transparent)]
    Value(#[from] ValueError),
    /// A required behavior was not present in the behavior set.
    #[error("missing required behavior '{key}'")]
    MissingBehavior {
        /// Behavior key that was expected.
        key: &'static str,
    },
    /// A behavior carried a malformed value.
    #[error("invalid value '{value}' for behavior '{key}'")]
    Behavior {
        /// Behavior key.
        key: &'static str,
        /// The malformed value text.
        value: String,
    },
    /// The path pattern could not be compiled.
    #[error(transparent)]
    Pattern(#[from] PatternError),
    /// The local-device index could not be built.
    #[error(transparent)]
    Fsdev(#[from] FsDevError),
    /// The underlying walk could not be opened or failed during iteration.
    #[error(transparent)]
    Walk(#[from] WalkError),
    /// The pruning engine failed while probing a node; fatal to the session.
    #[error("pattern engine failed during traversal")]
    Eval(#[source] PatternError),
}
