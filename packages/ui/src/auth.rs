//! Authentication context and hooks for the UI.
//!
//! [`AuthProvider`] owns the one piece of global state in the console: the
//! signed-in session. It is loaded from platform storage on mount, exposed as
//! a `Signal<AuthState>`, and wired into the [`ApiClient`] through
//! [`AuthHandle`], which implements [`SessionContext`]. When any request comes
//! back 401 the client calls [`AuthHandle::expire`], which resets the signal
//! and removes the stored session; route guards react to the signal change.

use std::rc::Rc;

use api::{ApiClient, SessionContext};
use dioxus::prelude::*;
use store::{AuthSession, AuthUser, ConsoleConfig, KeyValueStore, SessionStore};

use crate::platform::make_session_store;

/// Authentication state for the application.
pub type AuthState = AuthSession;

/// Where the session is persisted between reloads.
pub trait SessionPersistence {
    fn load(&self) -> AuthSession;
    fn save(&self, session: &AuthSession);
    fn clear(&self);
}

impl<S: KeyValueStore> SessionPersistence for SessionStore<S> {
    fn load(&self) -> AuthSession {
        SessionStore::load(self)
    }

    fn save(&self, session: &AuthSession) {
        SessionStore::save(self, session)
    }

    fn clear(&self) {
        SessionStore::clear(self)
    }
}

/// The auth signal together with its persistence.
#[derive(Clone)]
pub struct AuthHandle {
    state: Signal<AuthState>,
    persistence: Rc<dyn SessionPersistence>,
}

impl PartialEq for AuthHandle {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && Rc::ptr_eq(&self.persistence, &other.persistence)
    }
}

impl AuthHandle {
    pub fn new(state: Signal<AuthState>, persistence: Rc<dyn SessionPersistence>) -> Self {
        Self { state, persistence }
    }

    pub fn state(&self) -> Signal<AuthState> {
        self.state
    }

    pub fn sign_in(&self, session: AuthSession) {
        self.persistence.save(&session);
        let mut state = self.state;
        state.set(session);
    }

    pub fn sign_out(&self) {
        self.persistence.clear();
        let mut state = self.state;
        state.set(AuthState::default());
    }

    /// Swap in a refreshed profile, keeping the token.
    pub fn update_user(&self, user: AuthUser) {
        let mut state = self.state;
        state.write().update_user(user);
        self.persistence.save(&state.peek());
    }
}

impl SessionContext for AuthHandle {
    fn token(&self) -> Option<String> {
        self.state.peek().bearer().map(str::to_string)
    }

    fn expire(&self) {
        tracing::info!("Session expired, signing out");
        self.sign_out();
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

pub fn use_auth_handle() -> AuthHandle {
    use_context::<AuthHandle>()
}

/// The REST client bound to the current session.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

pub fn use_config() -> ConsoleConfig {
    use_context::<ConsoleConfig>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(config: ConsoleConfig, children: Element) -> Element {
    let persistence = use_hook(|| Rc::new(make_session_store()) as Rc<dyn SessionPersistence>);
    let state = use_signal({
        let persistence = persistence.clone();
        move || persistence.load()
    });

    let handle = use_context_provider(|| AuthHandle::new(state, persistence.clone()));
    use_context_provider(|| state);
    use_context_provider(|| {
        tracing::info!("API base URL: {}", config.api.base_url);
        ApiClient::new(&config.api.base_url, Rc::new(handle.clone()))
    });
    use_context_provider(|| config.clone());

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Keluar".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    on_logout: EventHandler<()>,
) -> Element {
    let handle = use_auth_handle();
    let api = use_api();
    let mut busy = use_signal(|| false);

    let onclick = move |_| {
        let handle = handle.clone();
        let api = api.clone();
        async move {
            busy.set(true);
            if let Err(e) = api.auth().logout().await {
                tracing::warn!("Logout request failed: {}", e);
            }
            handle.sign_out();
            busy.set(false);
            on_logout.call(());
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: busy(),
            onclick: onclick,
            "{label}"
        }
    }
}
