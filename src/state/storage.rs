//! Durable key-value persistence for session identity.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build writes to `localStorage`; tests and SSR use an in-memory
//! map. Session fields are only ever written through [`PersistedSession`] so
//! each storage write pairs with exactly one in-memory mutation.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::session::SessionState;
use crate::net::types::{Member, User};

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "user";
pub const MEMBERS_KEY: &str = "members";
pub const CURRENT_MEMBER_KEY: &str = "current_member";

const SESSION_KEYS: [&str; 4] = [TOKEN_KEY, USER_KEY, MEMBERS_KEY, CURRENT_MEMBER_KEY];

/// String key-value store surviving process restarts.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`. All operations no-op outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// Process-local map, used for tests and server rendering.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
    }
}

/// The only reader/writer of the four session keys.
pub struct PersistedSession<'a, S: KeyValueStorage + ?Sized> {
    storage: &'a S,
}

impl<'a, S: KeyValueStorage + ?Sized> PersistedSession<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// Hydrate session state from storage.
    ///
    /// Unreadable entries count as absent; without a token nothing else is
    /// trusted.
    pub fn load(&self) -> SessionState {
        let Some(token) = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty()) else {
            return SessionState::default();
        };
        SessionState {
            token: Some(token),
            user: self.load_json::<User>(USER_KEY),
            members: self.load_json::<Vec<Member>>(MEMBERS_KEY).unwrap_or_default(),
            current_member: self.load_json::<Member>(CURRENT_MEMBER_KEY),
            ..SessionState::default()
        }
    }

    /// Write every identity field of `state`; `None` fields are removed.
    pub fn persist_all(&self, state: &SessionState) {
        match &state.token {
            Some(token) => self.storage.set(TOKEN_KEY, token),
            None => self.storage.remove(TOKEN_KEY),
        }
        self.persist_user(state.user.as_ref());
        self.persist_members(&state.members);
        self.persist_current_member(state.current_member.as_ref());
    }

    pub fn persist_user(&self, user: Option<&User>) {
        self.save_or_remove(USER_KEY, user);
    }

    pub fn persist_members(&self, members: &[Member]) {
        self.save_json(MEMBERS_KEY, members);
    }

    pub fn persist_current_member(&self, member: Option<&Member>) {
        self.save_or_remove(CURRENT_MEMBER_KEY, member);
    }

    /// Purge every session key.
    pub fn clear(&self) {
        for key in SESSION_KEYS {
            self.storage.remove(key);
        }
    }

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.storage.get(key)?;
        serde_json::from_str(&raw).ok()
    }

    fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        self.storage.set(key, &raw);
    }

    fn save_or_remove<T: Serialize>(&self, key: &str, value: Option<&T>) {
        match value {
            Some(value) => self.save_json(key, value),
            None => self.storage.remove(key),
        }
    }
}
