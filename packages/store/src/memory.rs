use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::session::KeyValueStore;

/// In-memory KeyValueStore for tests and non-persistent fallbacks.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("a").is_none());

        store.set("a", "1");
        assert_eq!(store.get("a").as_deref(), Some("1"));

        store.set("a", "2");
        assert_eq!(store.get("a").as_deref(), Some("2"));

        store.remove("a");
        assert!(store.get("a").is_none());
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v");
        assert_eq!(other.get("k").as_deref(), Some("v"));
    }
}
