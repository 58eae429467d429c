use entity::{Entity, EntityValue, Operation};

use crate::node::DocNode;

/// How a set expression combines its referenced objects.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SetOperation {
    /// Union of the referenced objects (the schema default).
    #[default]
    Union,
    /// Intersection of the referenced objects.
    Intersection,
    /// First object minus the remaining ones.
    Complement,
}

impl SetOperation {
    /// Canonical schema text of the operator.
    #[must_use]
    pub const fn as_text(self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Intersection => "INTERSECTION",
            Self::Complement => "COMPLEMENT",
        }
    }
}

/// A set composition referencing other objects by id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetExpression {
    operation: SetOperation,
    object_refs: Vec<String>,
}

impl SetExpression {
    /// Creates a set expression over the given object references.
    #[must_use]
    pub fn new(operation: SetOperation, object_refs: Vec<String>) -> Self {
        Self {
            operation,
            object_refs,
        }
    }

    /// Returns the combining operator.
    #[must_use]
    pub const fn operation(&self) -> SetOperation {
        self.operation
    }

    /// Returns the referenced object ids in order.
    #[must_use]
    pub fn object_refs(&self) -> &[String] {
        &self.object_refs
    }
}

/// What a filter does with states it matches.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FilterAction {
    /// Keep only items matching the referenced state.
    Include,
    /// Drop items matching the referenced state (the schema default).
    #[default]
    Exclude,
}

impl FilterAction {
    /// Canonical schema text of the action.
    #[must_use]
    pub const fn as_text(self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Exclude => "exclude",
        }
    }
}

/// A filter referencing a state by id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Filter {
    action: FilterAction,
    state_ref: String,
}

impl Filter {
    /// Creates a filter for the given state reference.
    #[must_use]
    pub fn new(action: FilterAction, state_ref: impl Into<String>) -> Self {
        Self {
            action,
            state_ref: state_ref.into(),
        }
    }

    /// Returns the filter action.
    #[must_use]
    pub const fn action(&self) -> FilterAction {
        self.action
    }

    /// Returns the referenced state id.
    #[must_use]
    pub fn state_ref(&self) -> &str {
        &self.state_ref
    }
}

/// One ordered content entry of an object: a plain entity reference or a
/// filter/set composition.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectContent {
    /// A named entity field, e.g. the `path` element of a file object.
    Entity {
        /// Field name the entity is bound to.
        field: String,
        /// The entity value and its comparison operation.
        entity: Entity,
    },
    /// A set composition over other objects.
    Set(SetExpression),
    /// A state filter applied to collected items.
    Filter(Filter),
}

impl ObjectContent {
    /// Convenience constructor for an entity field entry.
    #[must_use]
    pub fn entity(field: impl Into<String>, entity: Entity) -> Self {
        Self::Entity {
            field: field.into(),
            entity,
        }
    }

    /// Every content entry must independently validate for the owning
    /// object to be considered valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Entity { field, .. } => !field.is_empty(),
            Self::Set(set) => {
                !set.object_refs.is_empty() && set.object_refs.iter().all(|r| !r.is_empty())
            }
            Self::Filter(filter) => !filter.state_ref.is_empty(),
        }
    }

    /// Serializes the entry into the generic tree representation.
    #[must_use]
    pub fn to_node(&self) -> DocNode {
        match self {
            Self::Entity { field, entity } => {
                let mut node = DocNode::new(field.clone());
                if entity.operation() != Operation::Equals {
                    node.set_attribute("operation", entity.operation().as_text());
                }
                match entity.value() {
                    EntityValue::Absent => node.set_attribute("xsi:nil", "true"),
                    EntityValue::Text(text) => node = node.text(text.clone()),
                    EntityValue::Int(value) => node = node.text(value.to_string()),
                    EntityValue::Bool(value) => node = node.text(value.to_string()),
                }
                node
            }
            Self::Set(set) => {
                let mut node = DocNode::new("set");
                if set.operation != SetOperation::Union {
                    node.set_attribute("set_operator", set.operation.as_text());
                }
                for object_ref in &set.object_refs {
                    node.add_child(DocNode::new("object_reference").text(object_ref.clone()));
                }
                node
            }
            Self::Filter(filter) => {
                let mut node = DocNode::new("filter").text(filter.state_ref.clone());
                node.set_attribute("action", filter.action.as_text());
                node
            }
        }
    }
}
