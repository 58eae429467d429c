use std::fmt;

/// Comparison operation attached to an entity.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Operation {
    /// Exact string equality (the schema default).
    #[default]
    Equals,
    /// Exact string inequality.
    NotEqual,
    /// Case-folded string equality.
    CaseInsensitiveEquals,
    /// Case-folded string inequality.
    CaseInsensitiveNotEqual,
    /// Ordered comparison, numeric when both sides parse as integers.
    GreaterThan,
    /// Ordered comparison, numeric when both sides parse as integers.
    LessThan,
    /// Ordered comparison, numeric when both sides parse as integers.
    GreaterThanOrEqual,
    /// Ordered comparison, numeric when both sides parse as integers.
    LessThanOrEqual,
    /// Regular-expression match of the candidate against the entity value.
    PatternMatch,
}

impl Operation {
    /// Parses the schema text of an operation attribute.
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "equals" => Some(Self::Equals),
            "not equal" => Some(Self::NotEqual),
            "case insensitive equals" => Some(Self::CaseInsensitiveEquals),
            "case insensitive not equal" => Some(Self::CaseInsensitiveNotEqual),
            "greater than" => Some(Self::GreaterThan),
            "less than" => Some(Self::LessThan),
            "greater than or equal" => Some(Self::GreaterThanOrEqual),
            "less than or equal" => Some(Self::LessThanOrEqual),
            "pattern match" => Some(Self::PatternMatch),
            _ => None,
        }
    }

    /// Canonical schema text of the operation.
    #[must_use]
    pub const fn as_text(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEqual => "not equal",
            Self::CaseInsensitiveEquals => "case insensitive equals",
            Self::CaseInsensitiveNotEqual => "case insensitive not equal",
            Self::GreaterThan => "greater than",
            Self::LessThan => "less than",
            Self::GreaterThanOrEqual => "greater than or equal",
            Self::LessThanOrEqual => "less than or equal",
            Self::PatternMatch => "pattern match",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}
