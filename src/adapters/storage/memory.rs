//! In-memory session store

use super::SessionStore;
use crate::domain::{Result, SessionKey, TrackError};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Session store that lives as long as the process
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: Mutex<HashMap<SessionKey, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given entries
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (SessionKey, &'a str)>) -> Self {
        let values = entries
            .into_iter()
            .map(|(k, v)| (k, v.to_string()))
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionKey, String>>> {
        self.values
            .lock()
            .map_err(|_| TrackError::Storage("session store lock poisoned".to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: SessionKey) -> Option<String> {
        self.lock().ok().and_then(|values| values.get(&key).cloned())
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<()> {
        self.lock()?.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: SessionKey) -> Result<()> {
        self.lock()?.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get(SessionKey::Token), None);

        store.set(SessionKey::Token, "abc").unwrap();
        assert_eq!(store.get(SessionKey::Token).as_deref(), Some("abc"));

        store.remove(SessionKey::Token).unwrap();
        assert_eq!(store.get(SessionKey::Token), None);
        store.remove(SessionKey::Token).unwrap();
    }

    #[test]
    fn test_clear_removes_every_key() {
        let store = MemorySessionStore::with_entries([
            (SessionKey::Token, "abc"),
            (SessionKey::Role, "DOCTOR"),
            (SessionKey::OrganizationId, "7"),
            (SessionKey::OrganizationName, "General Hospital"),
            (SessionKey::UserId, "42"),
        ]);

        store.clear().unwrap();

        for key in SessionKey::ALL {
            assert_eq!(store.get(key), None, "{key} survived clear");
        }
    }
}
