//! Process-local session store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{SessionKey, SessionStore, SessionStoreError};

/// Session store that forgets everything when dropped. Used by tests and
/// when no session directory is configured.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<SessionKey, String>>,
}

impl MemorySessionStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries(entries: impl IntoIterator<Item = (SessionKey, String)>) -> Self {
        Self {
            entries: RwLock::new(entries.into_iter().collect()),
        }
    }
}

fn poisoned() -> SessionStoreError {
    SessionStoreError::io("session store lock poisoned")
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: SessionKey) -> Result<Option<String>, SessionStoreError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(&key).cloned())
    }

    async fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionStoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key, value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: SessionKey) -> Result<(), SessionStoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(&key);
        Ok(())
    }
}
