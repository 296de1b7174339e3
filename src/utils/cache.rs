//! localStorage-backed cache store.
//!
//! localStorage persists across sessions and is shared by every tab of the
//! origin. Other tabs' writes arrive as `storage` events on the window; the
//! browser never delivers a tab's own writes back to it.

use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::StorageEvent;

use super::{console, dom};
use crate::core::error::StorageError;
use crate::core::storage::{ChangeListener, KeyValueStore, StorageChange, Subscription};

/// [`KeyValueStore`] over `window.localStorage`.
///
/// Every call looks storage up afresh, so the handle is free to copy around.
/// When storage is unavailable (privacy mode, sandboxed iframe) reads miss
/// and writes fail with [`StorageError::StorageUnavailable`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    /// Serialize `data` as JSON and store it under `key`.
    pub fn set_json<T: Serialize>(&self, key: &str, data: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(data).map_err(|_| StorageError::SerializationFailed)?;
        self.set(key, &json)
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        dom::local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = dom::local_storage().ok_or(StorageError::StorageUnavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StorageError::WriteFailed)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let storage = dom::local_storage().ok_or(StorageError::StorageUnavailable)?;
        storage
            .remove_item(key)
            .map_err(|_| StorageError::WriteFailed)
    }

    /// Listen for `storage` events on the window until the subscription drops.
    fn subscribe(&self, on_change: ChangeListener) -> Subscription {
        let Some(window) = dom::window() else {
            return Subscription::inert();
        };

        let closure = Closure::wrap(Box::new(move |event: StorageEvent| {
            on_change(&StorageChange {
                key: event.key(),
                new_value: event.new_value(),
            });
        }) as Box<dyn Fn(StorageEvent)>);

        if window
            .add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref())
            .is_err()
        {
            console::warn("Failed to subscribe to storage events");
            return Subscription::inert();
        }

        Subscription::new(move || {
            let _ = window
                .remove_event_listener_with_callback("storage", closure.as_ref().unchecked_ref());
        })
    }
}
