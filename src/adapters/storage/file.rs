//! JSON-file session store
//!
//! The file holds a flat object keyed by the session key strings:
//!
//! ```json
//! { "token": "abc", "role": "DOCTOR", "organizationId": "7" }
//! ```
//!
//! Every mutation rewrites the whole file. Unknown keys found in the file
//! are preserved.

use super::SessionStore;
use crate::domain::{Result, SessionKey, TrackError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Session store backed by a JSON file
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileSessionStore {
    /// Open the store at `path`
    ///
    /// A missing file is an empty session; the file and its parent directory
    /// are created on the first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON object of strings.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let values = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|e| {
                TrackError::Storage(format!(
                    "Failed to read session file {}: {}",
                    path.display(),
                    e
                ))
            })?;

            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents).map_err(|e| {
                    TrackError::Storage(format!(
                        "Session file {} is corrupt: {}",
                        path.display(),
                        e
                    ))
                })?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), keys = values.len(), "Session store opened");

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| TrackError::Storage("session store lock poisoned".to_string()))
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    TrackError::Storage(format!(
                        "Failed to create session directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let contents = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, contents).map_err(|e| {
            TrackError::Storage(format!(
                "Failed to write session file {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: SessionKey) -> Option<String> {
        self.lock()
            .ok()
            .and_then(|values| values.get(key.as_str()).cloned())
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<()> {
        let mut values = self.lock()?;
        values.insert(key.as_str().to_string(), value.to_string());
        self.persist(&values)
    }

    fn remove(&self, key: SessionKey) -> Result<()> {
        let mut values = self.lock()?;
        if values.remove(key.as_str()).is_some() {
            self.persist(&values)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut values = self.lock()?;
        let before = values.len();
        for key in SessionKey::ALL {
            values.remove(key.as_str());
        }
        if values.len() != before {
            self.persist(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_session() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::open(dir.path().join("session.json")).unwrap();
        for key in SessionKey::ALL {
            assert_eq!(store.get(key), None);
        }
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileSessionStore::open(&path).unwrap();
        store.set(SessionKey::Token, "abc").unwrap();
        store.set(SessionKey::Role, "DOCTOR").unwrap();
        drop(store);

        let reopened = FileSessionStore::open(&path).unwrap();
        assert_eq!(reopened.get(SessionKey::Token).as_deref(), Some("abc"));
        assert_eq!(reopened.get(SessionKey::Role).as_deref(), Some("DOCTOR"));
    }

    #[test]
    fn test_clear_keeps_foreign_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"token":"abc","userId":"42","theme":"dark"}"#).unwrap();

        let store = FileSessionStore::open(&path).unwrap();
        store.clear().unwrap();

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw.get("theme").map(String::as_str), Some("dark"));
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let err = FileSessionStore::open(&path).unwrap_err();
        assert!(matches!(err, TrackError::Storage(_)));
    }
}
