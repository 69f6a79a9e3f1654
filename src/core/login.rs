//! Sign-in flow
//!
//! Turns a token response into a stored session and picks the landing
//! route for the user's role.

use super::context::AuthContext;
use super::guard::Route;
use crate::domain::models::{Credentials, TokenResponse};
use crate::domain::{Result, Role, SessionKey, TrackError};
use crate::services::AuthService;

/// Organization name stored when the backend does not send one
pub const UNKNOWN_ORGANIZATION: &str = "Unknown Organization";

/// Authenticate and establish the session
///
/// On success the five session keys are written (organization and user
/// id only when the backend sent them) and the landing route for the role
/// is returned. Ids left over from an earlier session are removed first.
///
/// # Errors
///
/// Propagates the API error of the login call. A `scope` that names no
/// known role is a `TrackError::Validation` and leaves the session
/// untouched.
pub async fn sign_in(
    auth: &AuthService,
    context: &AuthContext,
    credentials: &Credentials,
) -> Result<Route> {
    let response = auth.login(credentials).await?;
    establish_session(context, &response)
}

/// Store a token response as the current session
///
/// # Errors
///
/// See [`sign_in`].
pub fn establish_session(context: &AuthContext, response: &TokenResponse) -> Result<Route> {
    let role = role_from_scope(response.scope.as_deref())?;
    let store = context.store();
    store.remove(SessionKey::OrganizationId)?;
    store.remove(SessionKey::UserId)?;

    let organization_name = response
        .organization_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_ORGANIZATION);
    store.set(SessionKey::OrganizationName, organization_name)?;

    if let Some(organization) = response.organization_id {
        store.set(SessionKey::OrganizationId, &organization.to_string())?;
    }
    if let Some(user) = response.user_id {
        store.set(SessionKey::UserId, &user.to_string())?;
    }

    context.login(&response.access_token, role)?;

    let landing = Route::landing_for(role);
    tracing::debug!(organization = %organization_name, landing = %landing, "Session established");
    Ok(landing)
}

/// Map the token `scope` to a role; no scope means patient
fn role_from_scope(scope: Option<&str>) -> Result<Role> {
    match scope.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(Role::Patient),
        Some(scope) => scope
            .parse()
            .map_err(|e: String| TrackError::Validation(format!("Login scope rejected: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::{MemorySessionStore, SessionStore};
    use crate::domain::{OrganizationId, UserId};
    use std::sync::Arc;
    use test_case::test_case;

    fn token(scope: Option<&str>) -> TokenResponse {
        TokenResponse {
            access_token: "abc".into(),
            refresh_token: None,
            token_type: Some("Bearer".into()),
            expires_in: Some(3600),
            scope: scope.map(str::to_string),
            organization_name: None,
            organization_id: None,
            user_id: None,
        }
    }

    fn context() -> (AuthContext, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::new());
        (AuthContext::init(store.clone()).unwrap(), store)
    }

    #[test_case(Some("admin"), Route::Admin)]
    #[test_case(Some("doctor"), Route::Doctor)]
    #[test_case(Some("labtechnician"), Route::Technician)]
    #[test_case(Some("PATIENT"), Route::Patient)]
    #[test_case(None, Route::Patient)]
    fn test_landing_route_by_scope(scope: Option<&str>, expected: Route) {
        let (context, _) = context();
        assert_eq!(establish_session(&context, &token(scope)).unwrap(), expected);
    }

    #[test]
    fn test_full_token_response_is_stored() {
        let (context, store) = context();
        let mut response = token(Some("doctor"));
        response.organization_name = Some("General Hospital".into());
        response.organization_id = Some(OrganizationId::new(7));
        response.user_id = Some(UserId::new(42));

        establish_session(&context, &response).unwrap();

        assert_eq!(store.get(SessionKey::Token).as_deref(), Some("abc"));
        assert_eq!(store.get(SessionKey::Role).as_deref(), Some("DOCTOR"));
        assert_eq!(store.get(SessionKey::OrganizationId).as_deref(), Some("7"));
        assert_eq!(
            store.get(SessionKey::OrganizationName).as_deref(),
            Some("General Hospital")
        );
        assert_eq!(store.get(SessionKey::UserId).as_deref(), Some("42"));
    }

    #[test]
    fn test_missing_organization_name_uses_placeholder() {
        let (context, store) = context();
        establish_session(&context, &token(Some("patient"))).unwrap();
        assert_eq!(
            store.get(SessionKey::OrganizationName).as_deref(),
            Some(UNKNOWN_ORGANIZATION)
        );
        assert_eq!(store.get(SessionKey::UserId), None);
    }

    #[test]
    fn test_unknown_scope_leaves_session_untouched() {
        let (context, store) = context();
        let err = establish_session(&context, &token(Some("janitor"))).unwrap_err();

        assert!(matches!(err, TrackError::Validation(_)));
        assert!(!context.is_authenticated());
        for key in SessionKey::ALL {
            assert_eq!(store.get(key), None);
        }
    }

    #[test]
    fn test_second_login_drops_previous_ids() {
        let (context, store) = context();
        let mut doctor = token(Some("doctor"));
        doctor.organization_id = Some(OrganizationId::new(7));
        doctor.user_id = Some(UserId::new(42));
        establish_session(&context, &doctor).unwrap();

        let mut patient = token(Some("patient"));
        patient.access_token = "b".into();
        let landing = establish_session(&context, &patient).unwrap();

        assert_eq!(landing, Route::Patient);
        assert_eq!(store.get(SessionKey::Token).as_deref(), Some("b"));
        assert_eq!(store.get(SessionKey::OrganizationId), None);
        assert_eq!(store.get(SessionKey::UserId), None);
        assert_eq!(context.session().user_id, None);
    }

    #[test]
    fn test_rejected_scope_keeps_existing_session() {
        let (context, store) = context();
        let mut doctor = token(Some("doctor"));
        doctor.user_id = Some(UserId::new(42));
        establish_session(&context, &doctor).unwrap();

        assert!(establish_session(&context, &token(Some("janitor"))).is_err());
        assert_eq!(store.get(SessionKey::UserId).as_deref(), Some("42"));
        assert!(context.is_authenticated());
    }
}
