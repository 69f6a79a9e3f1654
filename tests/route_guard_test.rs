//! Integration tests for role-based route guarding

use patient_track::adapters::storage::MemorySessionStore;
use patient_track::core::{AuthContext, GuardDecision, Route, RouteGuard};
use patient_track::domain::{Role, SessionKey};
use std::sync::Arc;
use test_case::test_case;

fn guard_for(role: Option<&str>) -> (RouteGuard, AuthContext) {
    let entries: Vec<(SessionKey, &str)> = match role {
        Some(role) => vec![(SessionKey::Token, "abc"), (SessionKey::Role, role)],
        None => Vec::new(),
    };
    let context = AuthContext::init(Arc::new(MemorySessionStore::with_entries(entries))).unwrap();
    (RouteGuard::new(context.clone()), context)
}

#[test_case(Route::Admin)]
#[test_case(Route::Doctor)]
#[test_case(Route::Patient)]
#[test_case(Route::Technician)]
#[test_case(Route::Root)]
fn test_anonymous_is_sent_to_login(route: Route) {
    let (guard, _) = guard_for(None);
    assert_eq!(guard.check(route), GuardDecision::RedirectToLogin);
}

#[test]
fn test_login_screen_is_public() {
    let (guard, _) = guard_for(None);
    assert_eq!(guard.check(Route::Login), GuardDecision::Render);
}

#[test_case("ADMIN", Route::Admin)]
#[test_case("DOCTOR", Route::Doctor)]
#[test_case("PATIENT", Route::Patient)]
#[test_case("LABTECHNICIAN", Route::Technician)]
fn test_each_role_reaches_only_its_own_area(role: &str, own: Route) {
    let (guard, _) = guard_for(Some(role));
    for route in [Route::Admin, Route::Doctor, Route::Patient, Route::Technician] {
        let expected = if route == own {
            GuardDecision::Render
        } else {
            GuardDecision::RedirectToLogin
        };
        assert_eq!(guard.check(route), expected, "{role} on {route}");
    }
}

#[test]
fn test_root_always_redirects() {
    let (guard, _) = guard_for(Some("ADMIN"));
    assert_eq!(guard.check(Route::Root), GuardDecision::RedirectToLogin);
}

#[test]
fn test_guard_follows_logout() {
    let (guard, context) = guard_for(Some("DOCTOR"));
    assert_eq!(guard.check(Route::Doctor), GuardDecision::Render);

    context.logout().unwrap();
    assert_eq!(guard.check(Route::Doctor), GuardDecision::RedirectToLogin);
}

#[test]
fn test_guard_follows_login() {
    let (guard, context) = guard_for(None);
    context.login("abc", Role::Patient).unwrap();
    assert_eq!(guard.check(Route::Patient), GuardDecision::Render);
}

#[test_case("/doctor/patients/11", Route::Doctor)]
#[test_case("/technician", Route::Technician)]
#[test_case("/", Route::Root)]
fn test_paths_resolve_to_guarded_routes(path: &str, route: Route) {
    assert_eq!(path.parse::<Route>().unwrap(), route);
}
