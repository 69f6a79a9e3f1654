//! Integration tests for session persistence and teardown
//!
//! These tests verify that:
//! - A session written by one run is restored by the next
//! - Logout clears exactly the five session keys
//! - Incomplete persisted sessions are normalized on restore
//! - Subscribers observe every login and teardown

use patient_track::adapters::storage::{FileSessionStore, SessionStore};
use patient_track::core::AuthContext;
use patient_track::domain::{AuthState, OrganizationId, Role, SessionKey, UserId};
use std::sync::Arc;
use tempfile::TempDir;

fn open(dir: &TempDir) -> (AuthContext, Arc<FileSessionStore>) {
    let store = Arc::new(FileSessionStore::open(dir.path().join("session.json")).unwrap());
    let context = AuthContext::init(store.clone()).unwrap();
    (context, store)
}

#[test]
fn test_session_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let (context, store) = open(&dir);
        store.set(SessionKey::OrganizationId, "7").unwrap();
        store
            .set(SessionKey::OrganizationName, "General Hospital")
            .unwrap();
        store.set(SessionKey::UserId, "42").unwrap();
        context.login("abc", Role::Doctor).unwrap();
    }

    let (context, _) = open(&dir);
    assert!(context.is_authenticated());
    assert_eq!(context.token().as_deref(), Some("abc"));
    assert_eq!(context.role(), Some(Role::Doctor));

    let session = context.session();
    assert_eq!(session.organization_id, Some(OrganizationId::new(7)));
    assert_eq!(session.organization_name.as_deref(), Some("General Hospital"));
    assert_eq!(session.user_id, Some(UserId::new(42)));
}

#[test]
fn test_logout_clears_every_key_across_restart() {
    let dir = TempDir::new().unwrap();

    {
        let (context, store) = open(&dir);
        store.set(SessionKey::UserId, "42").unwrap();
        store.set(SessionKey::OrganizationId, "7").unwrap();
        context.login("abc", Role::Admin).unwrap();
        context.logout().unwrap();
    }

    let (context, store) = open(&dir);
    assert!(!context.is_authenticated());
    for key in SessionKey::ALL {
        assert_eq!(store.get(key), None, "{key} should be cleared");
    }
}

#[test]
fn test_logout_keeps_unrelated_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(
        &path,
        r#"{"token": "abc", "role": "PATIENT", "theme": "dark"}"#,
    )
    .unwrap();

    let store = Arc::new(FileSessionStore::open(&path).unwrap());
    let context = AuthContext::init(store).unwrap();
    assert_eq!(context.role(), Some(Role::Patient));
    context.logout().unwrap();

    let contents: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(contents, serde_json::json!({"theme": "dark"}));
}

#[test]
fn test_token_without_role_is_discarded_on_restore() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, r#"{"token": "abc", "userId": "42"}"#).unwrap();

    let store = Arc::new(FileSessionStore::open(&path).unwrap());
    let context = AuthContext::init(store.clone()).unwrap();

    assert!(!context.is_authenticated());
    assert_eq!(store.get(SessionKey::Token), None);
    assert_eq!(store.get(SessionKey::UserId).as_deref(), Some("42"));
}

#[test]
fn test_unknown_persisted_role_is_discarded_on_restore() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, r#"{"token": "abc", "role": "JANITOR"}"#).unwrap();

    let store = Arc::new(FileSessionStore::open(&path).unwrap());
    let context = AuthContext::init(store.clone()).unwrap();

    assert_eq!(context.state(), AuthState::Anonymous);
    assert_eq!(store.get(SessionKey::Role), None);
    assert_eq!(store.get(SessionKey::Token), None);
}

#[test]
fn test_corrupt_session_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();

    assert!(FileSessionStore::open(&path).is_err());
}

#[tokio::test]
async fn test_subscribers_see_login_and_expiry() {
    let dir = TempDir::new().unwrap();
    let (context, _) = open(&dir);
    let mut updates = context.subscribe();

    context.login("abc", Role::LabTechnician).unwrap();
    updates.changed().await.unwrap();
    assert_eq!(updates.borrow_and_update().role(), Some(Role::LabTechnician));

    context.expire().unwrap();
    updates.changed().await.unwrap();
    assert!(!updates.borrow_and_update().is_authenticated());
}

