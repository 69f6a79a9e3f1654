//! Authentication context
//!
//! [`AuthContext`] owns the session store handle and publishes the
//! authentication state on a `watch` channel. The API client, the route
//! guard and the CLI all share one context, so a 401 teardown is seen by
//! every observer.

use crate::adapters::storage::SessionStore;
use crate::domain::{AuthState, Result, Role, Session, SessionKey};
use crate::log_session_cleared;
use std::sync::Arc;
use tokio::sync::watch;

/// Shared, observable session state
///
/// # Example
///
/// ```
/// use patient_track::adapters::storage::MemorySessionStore;
/// use patient_track::core::context::AuthContext;
/// use patient_track::domain::Role;
/// use std::sync::Arc;
///
/// let context = AuthContext::init(Arc::new(MemorySessionStore::new())).unwrap();
/// assert!(!context.is_authenticated());
///
/// context.login("abc", Role::Doctor).unwrap();
/// assert_eq!(context.role(), Some(Role::Doctor));
///
/// context.logout().unwrap();
/// assert!(!context.is_authenticated());
/// ```
#[derive(Clone)]
pub struct AuthContext {
    store: Arc<dyn SessionStore>,
    state: Arc<watch::Sender<AuthState>>,
}

impl AuthContext {
    /// Restore the context from the store
    ///
    /// A store holding only half of the token/role pair, or a role that no
    /// longer parses, is treated as anonymous and the stray keys are
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns an error if removing stray keys fails.
    pub fn init(store: Arc<dyn SessionStore>) -> Result<Self> {
        let session = Session::from_lookup(|key| store.get(key));
        let state = session.auth_state();

        let has_token = store.get(SessionKey::Token).is_some();
        let has_role = store.get(SessionKey::Role).is_some();
        if !state.is_authenticated() && (has_token || has_role) {
            tracing::warn!(
                has_token,
                has_role,
                "Discarding incomplete persisted session"
            );
            store.remove(SessionKey::Token)?;
            store.remove(SessionKey::Role)?;
        }

        tracing::debug!(authenticated = state.is_authenticated(), role = ?state.role(), "Session restored");

        let (tx, _rx) = watch::channel(state);
        Ok(Self {
            store,
            state: Arc::new(tx),
        })
    }

    /// Persist a fresh session and publish it
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn login(&self, token: &str, role: Role) -> Result<()> {
        self.store.set(SessionKey::Token, token)?;
        self.store.set(SessionKey::Role, role.as_str())?;

        self.state.send_replace(AuthState::Authenticated {
            token: token.to_string(),
            role,
        });
        tracing::info!(role = %role, "Signed in");
        Ok(())
    }

    /// Clear every session key and publish anonymous
    ///
    /// Calling this while already anonymous is a no-op apart from the
    /// (empty) store clear.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written. The published state
    /// is anonymous either way.
    pub fn logout(&self) -> Result<()> {
        self.teardown("logout")
    }

    /// Teardown after the backend rejected the session
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn expire(&self) -> Result<()> {
        self.teardown("session expired")
    }

    fn teardown(&self, reason: &'static str) -> Result<()> {
        let cleared = self.store.clear();
        let was_authenticated = self.state.send_replace(AuthState::Anonymous).is_authenticated();
        if was_authenticated {
            log_session_cleared!(reason);
        }
        cleared
    }

    /// True iff a token is held
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token().map(str::to_string)
    }

    pub fn role(&self) -> Option<Role> {
        self.state.borrow().role()
    }

    /// Current state snapshot
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Typed view of everything persisted, including the cached identity
    pub fn session(&self) -> Session {
        Session::from_lookup(|key| self.store.get(key))
    }

    /// Receiver notified on every login and teardown
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Underlying store, for the identity keys the context does not own
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemorySessionStore;

    fn context_with(entries: &[(SessionKey, &str)]) -> (AuthContext, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::with_entries(entries.iter().copied()));
        let context = AuthContext::init(store.clone()).unwrap();
        (context, store)
    }

    #[test]
    fn test_init_restores_session() {
        let (context, _) = context_with(&[(SessionKey::Token, "abc"), (SessionKey::Role, "ADMIN")]);
        assert!(context.is_authenticated());
        assert_eq!(context.token().as_deref(), Some("abc"));
        assert_eq!(context.role(), Some(Role::Admin));
    }

    #[test]
    fn test_init_discards_token_without_role() {
        let (context, store) = context_with(&[(SessionKey::Token, "abc"), (SessionKey::UserId, "42")]);
        assert!(!context.is_authenticated());
        assert_eq!(store.get(SessionKey::Token), None);
        assert_eq!(store.get(SessionKey::UserId).as_deref(), Some("42"));
    }

    #[test]
    fn test_init_discards_unknown_role() {
        let (context, store) = context_with(&[(SessionKey::Token, "abc"), (SessionKey::Role, "NURSE")]);
        assert!(!context.is_authenticated());
        assert_eq!(store.get(SessionKey::Role), None);
    }

    #[test]
    fn test_login_then_logout_leaves_no_keys() {
        let (context, store) = context_with(&[]);
        store.set(SessionKey::OrganizationId, "7").unwrap();
        store.set(SessionKey::UserId, "42").unwrap();

        context.login("abc", Role::Doctor).unwrap();
        assert_eq!(store.get(SessionKey::Token).as_deref(), Some("abc"));
        assert_eq!(store.get(SessionKey::Role).as_deref(), Some("DOCTOR"));

        context.logout().unwrap();
        for key in SessionKey::ALL {
            assert_eq!(store.get(key), None);
        }
        assert!(!context.is_authenticated());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let (context, _) = context_with(&[]);
        context.logout().unwrap();
        context.logout().unwrap();
        assert_eq!(context.state(), AuthState::Anonymous);
    }

    #[tokio::test]
    async fn test_subscribers_observe_changes() {
        let (context, _) = context_with(&[]);
        let mut rx = context.subscribe();

        context.login("abc", Role::Patient).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().role(), Some(Role::Patient));

        context.expire().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), AuthState::Anonymous);
    }

    #[test]
    fn test_clones_share_state() {
        let (context, _) = context_with(&[]);
        let clone = context.clone();
        context.login("abc", Role::LabTechnician).unwrap();
        assert_eq!(clone.role(), Some(Role::LabTechnician));
    }
}
