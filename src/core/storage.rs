//! Key/value store abstraction for the home info cache.
//!
//! The browser's `localStorage` is process-wide ambient state. Modelling it as
//! a [`KeyValueStore`] lets the provider run against the real storage in the
//! browser and against [`MemoryStore`] in tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::core::error::StorageError;

/// A change made to the store by another execution context (another tab).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StorageChange {
    /// Changed key, or `None` when the whole store was cleared.
    pub key: Option<String>,
    /// Value after the change, or `None` when the key was removed.
    pub new_value: Option<String>,
}

impl StorageChange {
    pub fn new(key: impl Into<String>, new_value: Option<String>) -> Self {
        Self {
            key: Some(key.into()),
            new_value,
        }
    }

    pub fn is_for(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }
}

/// Callback invoked for every external store change.
pub type ChangeListener = Rc<dyn Fn(&StorageChange)>;

/// Active change subscription. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A subscription that never fires (store has no change notifications).
    pub fn inert() -> Self {
        Self { unsubscribe: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

/// String-keyed, string-valued synchronous store with change notifications.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Observe changes made by *other* execution contexts.
    ///
    /// Writes performed through this handle are not reported.
    fn subscribe(&self, on_change: ChangeListener) -> Subscription;
}

// =============================================================================
// MemoryStore
// =============================================================================

#[derive(Default)]
struct MemoryInner {
    entries: RefCell<HashMap<String, String>>,
    listeners: RefCell<Vec<(u64, ChangeListener)>>,
    next_id: Cell<u64>,
}

/// In-memory [`KeyValueStore`].
///
/// Clones share the same entries and listeners. Like `localStorage`, writes
/// through [`KeyValueStore::set`] are silent; use
/// [`MemoryStore::write_from_other_tab`] to simulate a foreign writer.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Rc<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .inner
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Apply a write as another tab would, then notify subscribers.
    pub fn write_from_other_tab(&self, key: &str, value: Option<&str>) {
        {
            let mut entries = self.inner.entries.borrow_mut();
            match value {
                Some(v) => entries.insert(key.to_string(), v.to_string()),
                None => entries.remove(key),
            };
        }
        self.notify(&StorageChange::new(key, value.map(str::to_string)));
    }

    /// Clear every entry as another tab would (`localStorage.clear()`).
    pub fn clear_from_other_tab(&self) {
        self.inner.entries.borrow_mut().clear();
        self.notify(&StorageChange::default());
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn notify(&self, change: &StorageChange) {
        // Snapshot so listeners may (un)subscribe while being notified.
        let listeners: Vec<ChangeListener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(change);
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn subscribe(&self, on_change: ChangeListener) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.listeners.borrow_mut().push((id, on_change));

        let inner = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.listeners.borrow_mut().retain(|(i, _)| *i != id);
            }
        })
    }
}
