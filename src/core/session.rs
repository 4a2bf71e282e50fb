//! Session context: who is logged in and how to tear the session down.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Manager,
}

/// Secure key-value store holding the auth token (platform keychain, AsyncStorage, ...).
pub trait SessionStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn role(&self) -> Option<Role>;
    fn save(&self, token: &str, role: Role);
    fn clear(&self);
}

/// Process-local store, mostly for tests and tooling.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<(String, Role)>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>, role: Role) -> Self {
        Self {
            inner: Mutex::new(Some((token.into(), role))),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().map(|(t, _)| t.clone())
    }

    fn role(&self) -> Option<Role> {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().map(|(_, r)| *r)
    }

    fn save(&self, token: &str, role: Role) {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some((token.to_string(), role));
    }

    fn clear(&self) {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedIn(Role),
    LoggedOut,
}

/// Explicit application session shared by the coordinator and the UI shell.
///
/// `begin` after a successful login, `purge` when the backend answers 401.
/// Observers get the state changes through `subscribe`.
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    state: watch::Sender<SessionState>,
}

impl SessionContext {
    /// Restore from the store: logged in iff a token is present.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let initial = match (store.token(), store.role()) {
            (Some(_), Some(role)) => SessionState::LoggedIn(role),
            (Some(_), None) => SessionState::LoggedIn(Role::Employee),
            _ => SessionState::LoggedOut,
        };
        let (state, _) = watch::channel(initial);
        Self { store, state }
    }

    pub fn begin(&self, token: &str, role: Role) {
        self.store.save(token, role);
        self.state.send_replace(SessionState::LoggedIn(role));
        info!(?role, "session started");
    }

    /// Drop every piece of local session state and signal "logged out".
    pub fn purge(&self) {
        self.store.clear();
        self.state.send_replace(SessionState::LoggedOut);
        info!("session purged");
    }

    pub fn token(&self) -> Option<String> {
        self.store.token()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(*self.state.borrow(), SessionState::LoggedIn(_))
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}
