//! Durable session persistence over a string key-value store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build keeps the session in `localStorage` so it survives
//! reloads. Native builds (SSR, tests) use an in-memory map behind the same
//! `KeyValueStore` seam.
//!
//! DESIGN
//! ======
//! Two logical entries: the bearer token as a raw string and the user record
//! as JSON. They are written and removed as a pair; a load that finds only
//! one of them, or a record that fails to parse, reports `Malformed` and is
//! never surfaced as an error.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::Session;
use crate::config::ClientConfig;
use crate::net::types::User;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage write failed for {key}")]
    Write { key: String },
    #[error("could not serialize user record: {0}")]
    Serialize(String),
}

/// Minimal string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

// =============================================================================
// BROWSER STORE
// =============================================================================

/// `window.localStorage`, looked up on every call.
///
/// Off-browser every read misses and every write reports
/// [`StoreError::Unavailable`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for BrowserStore {
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

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage().ok_or(StoreError::Unavailable)?;
            storage
                .set_item(key, value)
                .map_err(|_| StoreError::Write { key: key.to_owned() })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(StoreError::Unavailable)
        }
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage().ok_or(StoreError::Unavailable)?;
            storage
                .remove_item(key)
                .map_err(|_| StoreError::Write { key: key.to_owned() })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(StoreError::Unavailable)
        }
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Shared in-memory store; clones see the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

// =============================================================================
// SESSION STORE
// =============================================================================

/// Result of reading the persisted session.
#[derive(Clone, Debug, PartialEq)]
pub enum StoredSession {
    /// Token and a parseable user record are both present.
    Present(Session),
    /// Neither entry exists.
    Absent,
    /// Only one entry exists, or the user record does not parse.
    Malformed,
}

/// The token + user-record pair persisted under two configured keys.
#[derive(Clone, Debug)]
pub struct SessionStore<K> {
    backend: K,
    token_key: String,
    user_key: String,
}

impl<K: KeyValueStore> SessionStore<K> {
    #[must_use]
    pub fn new(backend: K, config: &ClientConfig) -> Self {
        Self::with_keys(backend, &config.token_key, &config.user_key)
    }

    #[must_use]
    pub fn with_keys(backend: K, token_key: &str, user_key: &str) -> Self {
        Self { backend, token_key: token_key.to_owned(), user_key: user_key.to_owned() }
    }

    pub fn load(&self) -> StoredSession {
        let token = self.backend.get(&self.token_key).filter(|t| !t.is_empty());
        let raw_user = self.backend.get(&self.user_key);
        match (token, raw_user) {
            (None, None) => StoredSession::Absent,
            (Some(token), Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => StoredSession::Present(Session { token, user }),
                Err(_) => StoredSession::Malformed,
            },
            _ => StoredSession::Malformed,
        }
    }

    /// Persist both entries. If the token write fails the user entry is
    /// rolled back so the pair is never half-written.
    ///
    /// # Errors
    ///
    /// Returns the first [`StoreError`] encountered.
    pub fn save(&self, session: &Session) -> Result<(), StoreError> {
        let raw_user = serde_json::to_string(&session.user).map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.backend.set(&self.user_key, &raw_user)?;
        if let Err(e) = self.backend.set(&self.token_key, &session.token) {
            if let Err(rollback) = self.backend.remove(&self.user_key) {
                leptos::logging::warn!("could not roll back stored user after failed token write: {rollback}");
            }
            return Err(e);
        }
        Ok(())
    }

    /// Remove both entries, attempting each even if the first fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`StoreError`] encountered.
    pub fn clear(&self) -> Result<(), StoreError> {
        let token = self.backend.remove(&self.token_key);
        let user = self.backend.remove(&self.user_key);
        token.and(user)
    }

    /// Whether a storage-change notification for `key` concerns the session.
    /// `None` means the whole store was cleared.
    #[must_use]
    pub fn is_session_key(&self, key: Option<&str>) -> bool {
        key.is_none_or(|k| k == self.token_key || k == self.user_key)
    }
}
