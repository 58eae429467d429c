#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `entity` models the typed value references OVAL objects are built from:
//! a named value with an attached comparison operation. The crate also
//! provides the comparison engine the filesystem probes call once per
//! candidate string, with the tri-state result the probes rely on: a
//! comparison can be true, false, or fail outright (absent value, malformed
//! payload, uncompilable pattern), and the three outcomes propagate
//! differently.
//!
//! # Design
//!
//! - [`Entity`] is immutable after construction; probes borrow entities from
//!   the parsed object model for the lifetime of a traversal session.
//! - [`Entity::string_value`] distinguishes an absent value from a malformed
//!   one, mirroring how the original extraction macros report "nil" and
//!   "error" separately.
//! - [`entity_cmp`] never panics and never allocates on the success path
//!   except for case-folded and pattern comparisons.

mod cmp;
mod ops;

#[cfg(test)]
mod tests;

pub use crate::cmp::{CmpResult, entity_cmp};
pub use crate::ops::Operation;

use std::fmt;

/// The payload carried by an entity.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EntityValue {
    /// No value was supplied (the entity was nil in the source document).
    Absent,
    /// A text value.
    Text(String),
    /// An integer value.
    Int(i64),
    /// A boolean value.
    Bool(bool),
}

impl EntityValue {
    /// Canonical name of the payload variant, used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Text(_) => "text",
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
        }
    }
}

/// A typed value reference with an attached comparison operation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entity {
    name: String,
    value: EntityValue,
    operation: Operation,
}

impl Entity {
    /// Creates an entity from its parts.
    #[must_use]
    pub fn new(name: impl Into<String>, value: EntityValue, operation: Operation) -> Self {
        Self {
            name: name.into(),
            value,
            operation,
        }
    }

    /// Convenience constructor for a text entity.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>, operation: Operation) -> Self {
        Self::new(name, EntityValue::Text(value.into()), operation)
    }

    /// Convenience constructor for a nil entity.
    #[must_use]
    pub fn nil(name: impl Into<String>) -> Self {
        Self::new(name, EntityValue::Absent, Operation::Equals)
    }

    /// Returns the entity name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw payload.
    #[must_use]
    pub fn value(&self) -> &EntityValue {
        &self.value
    }

    /// Returns the comparison operation attached to the entity.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// Reports whether the entity carries no value.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self.value, EntityValue::Absent)
    }

    /// Materializes the entity's string value.
    ///
    /// Absence and malformation are reported distinctly so callers can treat
    /// an optional entity's absence as a valid configuration while still
    /// failing hard on a payload of the wrong type.
    pub fn string_value(&self) -> Result<&str, ValueError> {
        match &self.value {
            EntityValue::Text(text) => Ok(text),
            EntityValue::Absent => Err(ValueError::Absent {
                name: self.name.clone(),
            }),
            other => Err(ValueError::Malformed {
                name: self.name.clone(),
                found: other.type_name(),
            }),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            EntityValue::Absent => write!(f, "{} {} (nil)", self.name, self.operation),
            EntityValue::Text(text) => write!(f, "{} {} '{}'", self.name, self.operation, text),
            EntityValue::Int(value) => write!(f, "{} {} {}", self.name, self.operation, value),
            EntityValue::Bool(value) => write!(f, "{} {} {}", self.name, self.operation, value),
        }
    }
}

/// Error raised when an entity's string value cannot be materialized.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// The entity carries no value at all.
    #[error("entity '{name}' has no value")]
    Absent {
        /// Name of the entity.
        name: String,
    },
    /// The entity carries a payload of the wrong type.
    #[error("entity '{name}' holds a {found} value where text was required")]
    Malformed {
        /// Name of the entity.
        name: String,
        /// Variant actually found.
        found: &'static str,
    },
}
