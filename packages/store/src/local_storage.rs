//! # Browser `localStorage` store
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] used on the **web platform**.
//! It writes straight to `window.localStorage`, so the persisted session is
//! shared by every tab of the console on the same origin.
//!
//! ## Error handling
//!
//! All methods swallow errors (private browsing, quota exceeded, storage
//! disabled). Reads return `None` and the console behaves as logged out; the
//! authoritative session always lives on the server.

use crate::session::KeyValueStore;

/// `window.localStorage`-backed KeyValueStore.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            tracing::warn!("localStorage unavailable, session not persisted");
            return;
        };
        if storage.set_item(key, value).is_err() {
            tracing::warn!("localStorage rejected write for {}", key);
        }
    }

    fn remove(&self, key: &str) {
        let Some(storage) = Self::storage() else {
            tracing::warn!("localStorage unavailable, {} not cleared", key);
            return;
        };
        if storage.remove_item(key).is_err() {
            tracing::warn!("localStorage rejected removal of {}", key);
        }
    }
}
