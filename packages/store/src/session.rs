//! # Persisted authentication session
//!
//! The console's only global state is the signed-in account and its bearer
//! token. This module owns how that state is represented and persisted; the
//! HTTP layer never reads it ambiently, it receives a context object built from
//! it (see the `api` crate).
//!
//! ## [`KeyValueStore`] trait
//!
//! A synchronous string key/value interface with `get`/`set`/`remove`.
//! Implementations live in sibling modules: [`crate::MemoryStore`] (tests),
//! [`crate::FileStore`] (native builds) and `LocalStorageStore` (browser).
//!
//! ## Storage format
//!
//! The session is written under [`AUTH_STORAGE_KEY`] as a versioned envelope:
//!
//! ```json
//! { "state": { "user": { ... }, "token": "eyJ...", "is_authenticated": true }, "version": 0 }
//! ```
//!
//! Reads are forgiving: a missing key, unparsable JSON, an unknown version or a
//! state where `is_authenticated` disagrees with the presence of user and token
//! all load as the logged-out session.

use serde::{Deserialize, Serialize};

use crate::models::AuthUser;

/// Storage key holding the persisted session envelope.
pub const AUTH_STORAGE_KEY: &str = "auth-storage";

const STORAGE_VERSION: u32 = 0;

/// Synchronous string key/value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Authenticated user plus bearer token.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: Option<AuthUser>,
    pub token: Option<String>,
    pub is_authenticated: bool,
}

impl AuthSession {
    /// Session for a freshly signed-in user.
    pub fn signed_in(user: AuthUser, token: String) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
        }
    }

    pub fn login(&mut self, user: AuthUser, token: String) {
        *self = Self::signed_in(user, token);
    }

    pub fn logout(&mut self) {
        *self = Self::default();
    }

    /// Token to send as `Authorization: Bearer`, if signed in.
    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Replace the cached user after a profile update, keeping the token.
    pub fn update_user(&mut self, user: AuthUser) {
        if self.is_authenticated {
            self.user = Some(user);
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role.is_admin())
    }

    fn is_consistent(&self) -> bool {
        let complete = self.user.is_some() && self.bearer().is_some();
        self.is_authenticated == complete
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    state: AuthSession,
    #[serde(default)]
    version: u32,
}

/// Loads and saves the [`AuthSession`] through a [`KeyValueStore`].
#[derive(Clone, Debug)]
pub struct SessionStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn load(&self) -> AuthSession {
        let Some(raw) = self.backend.get(AUTH_STORAGE_KEY) else {
            return AuthSession::default();
        };
        match serde_json::from_str::<Envelope>(&raw) {
            Ok(envelope) if envelope.version == STORAGE_VERSION && envelope.state.is_consistent() => {
                envelope.state
            }
            Ok(envelope) => {
                tracing::warn!(
                    version = envelope.version,
                    "discarding inconsistent persisted session"
                );
                AuthSession::default()
            }
            Err(e) => {
                tracing::warn!("discarding unreadable persisted session: {}", e);
                AuthSession::default()
            }
        }
    }

    pub fn save(&self, session: &AuthSession) {
        let envelope = Envelope {
            state: session.clone(),
            version: STORAGE_VERSION,
        };
        match serde_json::to_string(&envelope) {
            Ok(json) => self.backend.set(AUTH_STORAGE_KEY, &json),
            Err(e) => tracing::error!("failed to serialize session: {}", e),
        }
    }

    pub fn clear(&self) {
        self.backend.remove(AUTH_STORAGE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::models::Role;

    fn admin() -> AuthUser {
        AuthUser {
            id: 1,
            username: "admin".to_string(),
            email: "admin@arsip.go.id".to_string(),
            full_name: "Admin Sistem".to_string(),
            role: Role::Admin,
            is_active: true,
            created_at: None,
            avatar: None,
        }
    }

    #[test]
    fn test_empty_store_is_logged_out() {
        let store = SessionStore::new(MemoryStore::new());
        let session = store.load();
        assert!(!session.is_authenticated);
        assert!(session.user.is_none());
        assert!(session.bearer().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let backend = MemoryStore::new();
        let store = SessionStore::new(backend.clone());

        store.save(&AuthSession::signed_in(admin(), "tok-123".to_string()));

        let loaded = SessionStore::new(backend).load();
        assert!(loaded.is_authenticated);
        assert_eq!(loaded.bearer(), Some("tok-123"));
        assert_eq!(loaded.user.unwrap().username, "admin");
    }

    #[test]
    fn test_envelope_format() {
        let backend = MemoryStore::new();
        let store = SessionStore::new(backend.clone());
        store.save(&AuthSession::signed_in(admin(), "tok".to_string()));

        let raw = backend.get(AUTH_STORAGE_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 0);
        assert_eq!(value["state"]["token"], "tok");
        assert_eq!(value["state"]["is_authenticated"], true);
    }

    #[test]
    fn test_corrupt_value_loads_logged_out() {
        let backend = MemoryStore::new();
        backend.set(AUTH_STORAGE_KEY, "{not json");
        assert_eq!(SessionStore::new(backend).load(), AuthSession::default());
    }

    #[test]
    fn test_inconsistent_state_loads_logged_out() {
        let backend = MemoryStore::new();
        backend.set(
            AUTH_STORAGE_KEY,
            r#"{"state":{"user":null,"token":"abc","is_authenticated":true},"version":0}"#,
        );
        assert!(!SessionStore::new(backend).load().is_authenticated);
    }

    #[test]
    fn test_clear_removes_key() {
        let backend = MemoryStore::new();
        let store = SessionStore::new(backend.clone());
        store.save(&AuthSession::signed_in(admin(), "tok".to_string()));
        store.clear();
        assert!(backend.get(AUTH_STORAGE_KEY).is_none());
    }

    #[test]
    fn test_logout_resets_everything() {
        let mut session = AuthSession::signed_in(admin(), "tok".to_string());
        assert!(session.is_admin());
        session.logout();
        assert_eq!(session, AuthSession::default());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_update_user_requires_session() {
        let mut session = AuthSession::default();
        session.update_user(admin());
        assert!(session.user.is_none());

        let mut session = AuthSession::signed_in(admin(), "tok".to_string());
        let mut renamed = admin();
        renamed.full_name = "Admin Baru".to_string();
        session.update_user(renamed);
        assert_eq!(session.user.unwrap().full_name, "Admin Baru");
        assert_eq!(session.token.as_deref(), Some("tok"));
    }
}
