use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, Weak};

use tracing::warn;

use crate::behavior::Behavior;
use crate::content::ObjectContent;
use crate::model::DefinitionModel;
use crate::node::DocNode;
use crate::subtype::{Family, OVAL_DEFINITIONS_NAMESPACE, Subtype};

/// One OVAL object definition, owned by a [`DefinitionModel`].
///
/// Objects are created through [`DefinitionModel::new_object`] and populated
/// incrementally. Every mutator consults the owning model's locked flag:
/// on a locked model it emits a warning, changes nothing, and reports
/// `false`; it never errors.
#[derive(Debug)]
pub struct Object {
    model: Weak<DefinitionModel>,
    id: String,
    state: RwLock<ObjectState>,
}

#[derive(Debug, Default)]
struct ObjectState {
    subtype: Subtype,
    comment: Option<String>,
    deprecated: bool,
    version: i32,
    notes: Vec<String>,
    behaviors: Vec<Behavior>,
    content: Vec<ObjectContent>,
}

impl Object {
    pub(crate) fn bound(model: Weak<DefinitionModel>, id: &str) -> Self {
        Self {
            model,
            id: id.to_owned(),
            state: RwLock::new(ObjectState::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ObjectState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `mutate` unless the owning model is locked.
    fn mutate<F: FnOnce(&mut ObjectState)>(&self, mutate: F) -> bool {
        if self.is_locked() {
            warn!(id = %self.id, "attempt to update locked content");
            return false;
        }
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        mutate(&mut state);
        true
    }

    /// Returns the object's stable identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the subtype identifying which check this object performs.
    #[must_use]
    pub fn subtype(&self) -> Subtype {
        self.read().subtype
    }

    /// Returns the family derived from the subtype.
    #[must_use]
    pub fn family(&self) -> Family {
        self.subtype().family()
    }

    /// Returns the canonical subtype name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.subtype().name()
    }

    /// Returns the free-text comment, when one is set.
    #[must_use]
    pub fn comment(&self) -> Option<String> {
        self.read().comment.clone()
    }

    /// Reports whether the object is marked deprecated.
    #[must_use]
    pub fn deprecated(&self) -> bool {
        self.read().deprecated
    }

    /// Returns the schema version.
    #[must_use]
    pub fn version(&self) -> i32 {
        self.read().version
    }

    /// Returns the ordered free-text notes.
    #[must_use]
    pub fn notes(&self) -> Vec<String> {
        self.read().notes.clone()
    }

    /// Returns the ordered behavior list.
    #[must_use]
    pub fn behaviors(&self) -> Vec<Behavior> {
        self.read().behaviors.clone()
    }

    /// Returns the ordered content entries.
    #[must_use]
    pub fn content(&self) -> Vec<ObjectContent> {
        self.read().content.clone()
    }

    /// Reports whether the owning model is locked. An object whose model is
    /// gone behaves as unlocked, matching a model torn down mid-parse.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.model.upgrade().is_some_and(|model| model.is_locked())
    }

    /// Sets the subtype. No-op on a locked model.
    pub fn set_subtype(&self, subtype: Subtype) -> bool {
        self.mutate(|state| state.subtype = subtype)
    }

    /// Sets or clears the comment. No-op on a locked model.
    pub fn set_comment(&self, comment: Option<String>) -> bool {
        self.mutate(|state| state.comment = comment)
    }

    /// Sets the deprecated flag. No-op on a locked model.
    pub fn set_deprecated(&self, deprecated: bool) -> bool {
        self.mutate(|state| state.deprecated = deprecated)
    }

    /// Sets the schema version. No-op on a locked model.
    pub fn set_version(&self, version: i32) -> bool {
        self.mutate(|state| state.version = version)
    }

    /// Appends a note. No-op on a locked model.
    pub fn add_note(&self, note: impl Into<String>) -> bool {
        let note = note.into();
        self.mutate(|state| state.notes.push(note))
    }

    /// Appends a behavior. No-op on a locked model.
    pub fn add_behavior(&self, behavior: Behavior) -> bool {
        self.mutate(|state| state.behaviors.push(behavior))
    }

    /// Appends a content entry. No-op on a locked model.
    pub fn add_content(&self, content: ObjectContent) -> bool {
        self.mutate(|state| state.content.push(content))
    }

    /// Checks structural validity: the subtype must be resolved, and every
    /// content entry and behavior must independently validate. The check
    /// short-circuits on the first invalid entry.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let state = self.read();
        if state.subtype == Subtype::Unknown {
            warn!(id = %self.id, "object is not valid: subtype is unknown");
            return false;
        }
        if !state.content.iter().all(ObjectContent::is_valid) {
            return false;
        }
        state.behaviors.iter().all(Behavior::is_valid)
    }

    /// Clones this object into `target`.
    ///
    /// When the target model already holds an object with this id, that
    /// object is returned unchanged. Otherwise a fresh object is created and
    /// comment, subtype, deprecated flag, version, behaviors, notes, and
    /// content are copied over in that order. Returns `None` only when the
    /// target model is locked.
    #[must_use]
    pub fn clone_into(&self, target: &Arc<DefinitionModel>) -> Option<Arc<Object>> {
        if let Some(existing) = target.object(&self.id) {
            return Some(existing);
        }
        let cloned = target.new_object(&self.id)?;
        let state = self.read();
        cloned.set_comment(state.comment.clone());
        cloned.set_subtype(state.subtype);
        cloned.set_deprecated(state.deprecated);
        cloned.set_version(state.version);
        for behavior in &state.behaviors {
            cloned.add_behavior(behavior.clone());
        }
        for note in &state.notes {
            cloned.add_note(note.clone());
        }
        for content in &state.content {
            cloned.add_content(content.clone());
        }
        drop(state);
        Some(cloned)
    }

    /// Serializes the object into the generic tree representation.
    ///
    /// The element is named `"<subtype>_object"` and placed under the
    /// family-derived namespace; `deprecated` is only written when set, and
    /// the `notes`/`behaviors` children are omitted when empty.
    #[must_use]
    pub fn to_node(&self) -> DocNode {
        let state = self.read();
        let family_uri = state.subtype.family().namespace_uri();
        let mut node =
            DocNode::new(format!("{}_object", state.subtype.name())).namespace(family_uri.clone());

        node.set_attribute("id", self.id.clone());
        node.set_attribute("version", state.version.to_string());
        if let Some(comment) = &state.comment {
            node.set_attribute("comment", comment.clone());
        }
        if state.deprecated {
            node.set_attribute("deprecated", "true");
        }

        if !state.notes.is_empty() {
            let mut notes = DocNode::new("notes").namespace(OVAL_DEFINITIONS_NAMESPACE);
            for note in &state.notes {
                notes.add_child(
                    DocNode::new("note")
                        .namespace(OVAL_DEFINITIONS_NAMESPACE)
                        .text(note.clone()),
                );
            }
            node.add_child(notes);
        }

        if !state.behaviors.is_empty() {
            let mut behaviors = DocNode::new("behaviors").namespace(family_uri);
            for behavior in &state.behaviors {
                behaviors.set_attribute(behavior.key(), behavior.value());
            }
            node.add_child(behaviors);
        }

        for content in &state.content {
            node.add_child(content.to_node());
        }

        node
    }
}

impl fmt::Display for Object {
    /// Indented structural dump used by diagnostic output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        writeln!(f, "OBJECT.ID         = {}", self.id)?;
        writeln!(f, "OBJECT.FAMILY     = {}", state.subtype.family())?;
        writeln!(f, "OBJECT.SUBTYPE    = {}", state.subtype)?;
        writeln!(f, "OBJECT.VERSION    = {}", state.version)?;
        writeln!(
            f,
            "OBJECT.COMMENT    = {}",
            state.comment.as_deref().unwrap_or("")
        )?;
        writeln!(f, "OBJECT.DEPRECATED = {}", state.deprecated)?;
        for (index, note) in state.notes.iter().enumerate() {
            writeln!(f, "OBJECT.NOTE[{}]    = {}", index + 1, note)?;
        }
        for (index, behavior) in state.behaviors.iter().enumerate() {
            writeln!(
                f,
                "OBJECT.BEHAVIOR[{}] = {} = {}",
                index + 1,
                behavior.key(),
                behavior.value()
            )?;
        }
        for (index, content) in state.content.iter().enumerate() {
            writeln!(f, "OBJECT.CONTENT[{}] = {}", index + 1, content.to_node().name())?;
        }
        Ok(())
    }
}
