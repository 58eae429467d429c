use std::cmp::Ordering;

use regex::Regex;

use crate::{Entity, Operation};

/// Tri-state outcome of an entity comparison.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CmpResult {
    /// The candidate satisfies the entity's operation.
    True,
    /// The candidate does not satisfy the entity's operation.
    False,
    /// The comparison itself failed (no value, wrong payload type, or an
    /// uncompilable pattern).
    Error,
}

impl From<bool> for CmpResult {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

/// Compares `candidate` against the entity's value under the entity's
/// operation.
///
/// Pattern comparisons compile the entity value as a regular expression on
/// every call; a pattern that fails to compile yields [`CmpResult::Error`],
/// not a panic and not `False`.
#[must_use]
pub fn entity_cmp(entity: &Entity, candidate: &str) -> CmpResult {
    let Ok(value) = entity.string_value() else {
        return CmpResult::Error;
    };

    match entity.operation() {
        Operation::Equals => CmpResult::from(candidate == value),
        Operation::NotEqual => CmpResult::from(candidate != value),
        Operation::CaseInsensitiveEquals => {
            CmpResult::from(fold(candidate) == fold(value))
        }
        Operation::CaseInsensitiveNotEqual => {
            CmpResult::from(fold(candidate) != fold(value))
        }
        Operation::GreaterThan => CmpResult::from(ordered(candidate, value) == Ordering::Greater),
        Operation::LessThan => CmpResult::from(ordered(candidate, value) == Ordering::Less),
        Operation::GreaterThanOrEqual => {
            CmpResult::from(ordered(candidate, value) != Ordering::Less)
        }
        Operation::LessThanOrEqual => {
            CmpResult::from(ordered(candidate, value) != Ordering::Greater)
        }
        Operation::PatternMatch => match Regex::new(value) {
            Ok(pattern) => CmpResult::from(pattern.is_match(candidate)),
            Err(_) => CmpResult::Error,
        },
    }
}

fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Numeric ordering when both sides parse as integers, lexicographic
/// otherwise.
fn ordered(candidate: &str, value: &str) -> Ordering {
    match (candidate.parse::<i64>(), value.parse::<i64>()) {
        (Ok(left), Ok(right)) => left.cmp(&right),
        _ => candidate.cmp(value),
    }
}
