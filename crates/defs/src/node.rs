/// Generic tree/attribute representation objects serialize into.
///
/// This is the neutral shape the surrounding document writer consumes; it
/// carries element names, an optional namespace URI, ordered attributes,
/// optional text content, and child elements, nothing more.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DocNode {
    name: String,
    namespace: Option<String>,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<DocNode>,
}

impl DocNode {
    /// Creates an element node with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the namespace URI of the element.
    #[must_use]
    pub fn namespace(mut self, uri: impl Into<String>) -> Self {
        self.namespace = Some(uri.into());
        self
    }

    /// Sets the text content of the element.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Appends an attribute; attribute order is preserved.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((key.into(), value.into()));
    }

    /// Appends a child element.
    pub fn add_child(&mut self, child: DocNode) {
        self.children.push(child);
    }

    /// Returns the element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the namespace URI, when one is set.
    #[must_use]
    pub fn namespace_uri(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns the ordered attribute list.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Looks up an attribute value by key.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the text content, when set.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the ordered child list.
    #[must_use]
    pub fn children(&self) -> &[DocNode] {
        &self.children
    }

    /// Finds the first child element with the given name.
    #[must_use]
    pub fn find_child(&self, name: &str) -> Option<&DocNode> {
        self.children.iter().find(|child| child.name == name)
    }
}
