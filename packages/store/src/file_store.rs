//! # Filesystem-backed key/value store
//!
//! [`FileStore`] is the [`KeyValueStore`] used by native builds of the console
//! (e.g. `dx serve --platform desktop` during development) so a session
//! survives restarts the same way `localStorage` does in the browser.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── <key>.json        # one file per key, raw value
//! ```
//!
//! Keys are sanitised to `[A-Za-z0-9_-]`; anything else becomes `_`.

use std::path::PathBuf;

use crate::session::KeyValueStore;

/// Filesystem-backed KeyValueStore.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base.join(format!("{name}.json"))
    }

    /// Delete the file for `key`. A key that was never written is not an error.
    fn remove_key(&self, key: &str) -> std::io::Result<()> {
        match std::fs::remove_file(self.key_path(key)) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            tracing::error!("Failed to create {}: {}", self.base.display(), e);
            return;
        }
        if let Err(e) = std::fs::write(self.key_path(key), value) {
            tracing::error!("Failed to write key {}: {}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.remove_key(key) {
            tracing::warn!("Failed to remove key {}: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthUser, Role};
    use crate::session::{AuthSession, SessionStore};

    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("arsip_store_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let store = SessionStore::new(FileStore::new(dir.clone()));
        let user = AuthUser {
            id: 7,
            username: "kadin".to_string(),
            email: "kadin@arsip.go.id".to_string(),
            full_name: "Kepala Dinas".to_string(),
            role: Role::Pimpinan,
            is_active: true,
            created_at: None,
            avatar: None,
        };
        store.save(&AuthSession::signed_in(user, "file-token".to_string()));

        // Re-open from same directory
        let reopened = SessionStore::new(FileStore::new(dir.clone()));
        let session = reopened.load();
        assert!(session.is_authenticated);
        assert_eq!(session.bearer(), Some("file-token"));

        reopened.clear();
        assert!(!SessionStore::new(FileStore::new(dir.clone())).load().is_authenticated);

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_key_sanitising() {
        let store = FileStore::new(PathBuf::from("/tmp/base"));
        assert_eq!(store.key_path("auth-storage"), PathBuf::from("/tmp/base/auth-storage.json"));
        assert_eq!(store.key_path("../etc/passwd"), PathBuf::from("/tmp/base/___etc_passwd.json"));
    }

    #[test]
    fn test_remove_missing_key_is_ok_and_failures_surface() {
        let dir = std::env::temp_dir().join(format!("arsip_store_remove_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let store = FileStore::new(dir.clone());

        assert!(store.remove_key("auth-storage").is_ok());

        // A directory where the value file should be cannot be removed as a file.
        std::fs::create_dir_all(store.key_path("auth-storage")).unwrap();
        assert!(store.remove_key("auth-storage").is_err());
        store.remove("auth-storage");
        assert!(store.key_path("auth-storage").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
