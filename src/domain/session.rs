//! Session model
//!
//! The session is the client-held proof of authentication plus the cached
//! identity attributes returned at login. It is stored as five string keys;
//! [`Session`] is the typed view over them and [`AuthState`] is the part the
//! rest of the client reacts to.

use super::ids::{OrganizationId, UserId};
use super::role::Role;
use std::fmt;

/// Keys of the persisted session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Token,
    Role,
    OrganizationId,
    OrganizationName,
    UserId,
}

impl SessionKey {
    /// All keys; cleared together on logout and on 401
    pub const ALL: [SessionKey; 5] = [
        SessionKey::Token,
        SessionKey::Role,
        SessionKey::OrganizationId,
        SessionKey::OrganizationName,
        SessionKey::UserId,
    ];

    /// Storage key string
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::Token => "token",
            SessionKey::Role => "role",
            SessionKey::OrganizationId => "organizationId",
            SessionKey::OrganizationName => "organizationName",
            SessionKey::UserId => "userId",
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication state observed by the route guard and the CLI
///
/// Token and role travel together: there is no partially authenticated
/// state.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticated { token: String, role: Role },
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            AuthState::Authenticated { token, .. } => Some(token),
            AuthState::Anonymous => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            AuthState::Authenticated { role, .. } => Some(*role),
            AuthState::Anonymous => None,
        }
    }
}

// Tokens must never end up in logs.
impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthState::Anonymous => f.write_str("Anonymous"),
            AuthState::Authenticated { role, .. } => f
                .debug_struct("Authenticated")
                .field("token", &"[REDACTED]")
                .field("role", role)
                .finish(),
        }
    }
}

/// Typed snapshot of the persisted session
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<Role>,
    pub organization_id: Option<OrganizationId>,
    pub organization_name: Option<String>,
    pub user_id: Option<UserId>,
}

impl Session {
    /// Reads the typed view from raw key lookups
    ///
    /// Values that fail to parse are treated as absent.
    pub fn from_lookup(get: impl Fn(SessionKey) -> Option<String>) -> Self {
        Self {
            token: get(SessionKey::Token).filter(|t| !t.is_empty()),
            role: get(SessionKey::Role).and_then(|r| r.parse().ok()),
            organization_id: get(SessionKey::OrganizationId).and_then(|v| v.parse().ok()),
            organization_name: get(SessionKey::OrganizationName),
            user_id: get(SessionKey::UserId).and_then(|v| v.parse().ok()),
        }
    }

    /// Authentication state carried by this snapshot
    pub fn auth_state(&self) -> AuthState {
        match (&self.token, self.role) {
            (Some(token), Some(role)) => AuthState::Authenticated {
                token: token.clone(),
                role,
            },
            _ => AuthState::Anonymous,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("role", &self.role)
            .field("organization_id", &self.organization_id)
            .field("organization_name", &self.organization_name)
            .field("user_id", &self.user_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(SessionKey, &str)]) -> impl Fn(SessionKey) -> Option<String> {
        let map: HashMap<SessionKey, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |key| map.get(&key).cloned()
    }

    #[test]
    fn test_key_strings() {
        let keys: Vec<&str> = SessionKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            ["token", "role", "organizationId", "organizationName", "userId"]
        );
    }

    #[test]
    fn test_session_from_lookup() {
        let session = Session::from_lookup(lookup(&[
            (SessionKey::Token, "abc"),
            (SessionKey::Role, "DOCTOR"),
            (SessionKey::OrganizationId, "7"),
            (SessionKey::OrganizationName, "General Hospital"),
            (SessionKey::UserId, "42"),
        ]));

        assert_eq!(session.token.as_deref(), Some("abc"));
        assert_eq!(session.role, Some(Role::Doctor));
        assert_eq!(session.organization_id, Some(OrganizationId::new(7)));
        assert_eq!(session.user_id, Some(UserId::new(42)));
        assert_eq!(
            session.auth_state(),
            AuthState::Authenticated {
                token: "abc".into(),
                role: Role::Doctor
            }
        );
    }

    #[test]
    fn test_token_without_role_is_anonymous() {
        let session = Session::from_lookup(lookup(&[(SessionKey::Token, "abc")]));
        assert_eq!(session.auth_state(), AuthState::Anonymous);

        let session = Session::from_lookup(lookup(&[
            (SessionKey::Token, "abc"),
            (SessionKey::Role, "JANITOR"),
        ]));
        assert!(!session.auth_state().is_authenticated());
    }

    #[test]
    fn test_debug_redacts_token() {
        let state = AuthState::Authenticated {
            token: "super-secret".into(),
            role: Role::Admin,
        };
        let rendered = format!("{state:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("Admin"));
    }
}
