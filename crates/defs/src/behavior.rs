/// A named configuration parameter attached to an object.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Behavior {
    key: String,
    value: String,
}

impl Behavior {
    /// Creates a behavior from its key/value pair.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns the behavior key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the behavior value text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// A behavior is valid when both key and value are non-empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.key.is_empty() && !self.value.is_empty()
    }
}
