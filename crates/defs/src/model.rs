use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::warn;

use crate::object::Object;

/// Shared-ownership container for parsed objects.
///
/// A model starts unlocked and mutable; locking it (typically at first
/// evaluation) is one-way and turns every mutator on every owned object into
/// a logged no-op. Reads stay safe from multiple threads once the model is
/// locked; callers serialize mutation against iteration on unlocked models.
#[derive(Debug, Default)]
pub struct DefinitionModel {
    locked: AtomicBool,
    objects: RwLock<HashMap<String, Arc<Object>>>,
}

impl DefinitionModel {
    /// Creates an empty, unlocked model.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Reports whether the model has been locked.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }

    /// Locks the model. Locking is one-way; there is no unlock.
    pub fn lock(&self) {
        self.locked.store(true, Ordering::Release);
    }

    /// Creates a fresh object bound to this model and registers it under
    /// `id`, replacing any object previously registered under the same id.
    ///
    /// On a locked model nothing is created and `None` is returned.
    #[must_use]
    pub fn new_object(self: &Arc<Self>, id: &str) -> Option<Arc<Object>> {
        if self.is_locked() {
            warn!(id, "attempt to update locked content");
            return None;
        }
        let object = Arc::new(Object::bound(Arc::downgrade(self), id));
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_owned(), Arc::clone(&object));
        Some(object)
    }

    /// Looks up an object by id.
    #[must_use]
    pub fn object(&self, id: &str) -> Option<Arc<Object>> {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Returns a snapshot of all owned objects, ordered by id.
    #[must_use]
    pub fn objects(&self) -> Vec<Arc<Object>> {
        let mut objects: Vec<_> = self
            .objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        objects.sort_by(|a, b| a.id().cmp(b.id()));
        objects
    }

    /// Number of registered objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Reports whether the model holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
