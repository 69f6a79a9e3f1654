//! Persisted session storage
//!
//! The session survives process restarts: every `ptrack` invocation reads
//! the same five string keys back. Storage is a trait so tests and embedders
//! can run against memory.

pub mod file;
pub mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

use crate::domain::{Result, SessionKey};

/// Key-value store for the persisted session
///
/// Writes are visible to the next `get` on the same store and, for durable
/// implementations, to the next process that opens it.
pub trait SessionStore: Send + Sync {
    /// Read a key; absent keys return `None`
    fn get(&self, key: SessionKey) -> Option<String>;

    /// Write a key, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&self, key: SessionKey, value: &str) -> Result<()>;

    /// Remove a key; removing an absent key is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the removal cannot be persisted.
    fn remove(&self, key: SessionKey) -> Result<()>;

    /// Remove all session keys
    ///
    /// Only the five session keys are touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal cannot be persisted.
    fn clear(&self) -> Result<()> {
        for key in SessionKey::ALL {
            self.remove(key)?;
        }
        Ok(())
    }
}
