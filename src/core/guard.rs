//! Route table and access control
//!
//! The guard decision is a pure function of the authentication state and
//! the route's rule. A signed-in user hitting another role's route is
//! treated exactly like an anonymous one: back to login, no "forbidden"
//! screen.

use super::context::AuthContext;
use crate::domain::Role;
use std::fmt;
use std::str::FromStr;

/// Top-level application routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Root,
    Admin,
    Doctor,
    Patient,
    Technician,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Login,
        Route::Root,
        Route::Admin,
        Route::Doctor,
        Route::Patient,
        Route::Technician,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Root => "/",
            Route::Admin => "/admin",
            Route::Doctor => "/doctor",
            Route::Patient => "/patient",
            Route::Technician => "/technician",
        }
    }

    /// Where a freshly signed-in user of `role` lands
    pub fn landing_for(role: Role) -> Route {
        match role {
            Role::Admin => Route::Admin,
            Role::Doctor => Route::Doctor,
            Role::Patient => Route::Patient,
            Role::LabTechnician => Route::Technician,
        }
    }

    pub fn access_rule(&self) -> RouteAccessRule {
        match self {
            Route::Login => RouteAccessRule::Public,
            Route::Root => RouteAccessRule::AlwaysRedirect,
            Route::Admin => RouteAccessRule::Roles(vec![Role::Admin]),
            Route::Doctor => RouteAccessRule::Roles(vec![Role::Doctor]),
            Route::Patient => RouteAccessRule::Roles(vec![Role::Patient]),
            Route::Technician => RouteAccessRule::Roles(vec![Role::LabTechnician]),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Resolves a path by its first segment, so `/doctor/patients/3` is
/// [`Route::Doctor`]
impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let first = trimmed
            .trim_start_matches('/')
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default();

        match first {
            "" => Ok(Route::Root),
            "login" => Ok(Route::Login),
            "admin" => Ok(Route::Admin),
            "doctor" => Ok(Route::Doctor),
            "patient" => Ok(Route::Patient),
            "technician" => Ok(Route::Technician),
            _ => Err(format!("Unknown route: '{trimmed}'")),
        }
    }
}

/// Who may render a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccessRule {
    /// Anyone, signed in or not
    Public,
    /// Nobody; the route only exists to bounce to login
    AlwaysRedirect,
    /// A signed-in user whose role is in the set
    Roles(Vec<Role>),
}

/// Outcome of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    RedirectToLogin,
}

/// Decide whether a route may render
///
/// ```
/// use patient_track::core::guard::{decide, GuardDecision, Route};
/// use patient_track::domain::Role;
///
/// let rule = Route::Admin.access_rule();
/// assert_eq!(decide(true, Some(Role::Admin), &rule), GuardDecision::Render);
/// assert_eq!(decide(true, Some(Role::Doctor), &rule), GuardDecision::RedirectToLogin);
/// ```
pub fn decide(is_authenticated: bool, role: Option<Role>, rule: &RouteAccessRule) -> GuardDecision {
    match rule {
        RouteAccessRule::Public => GuardDecision::Render,
        RouteAccessRule::AlwaysRedirect => GuardDecision::RedirectToLogin,
        RouteAccessRule::Roles(allowed) => match role {
            Some(role) if is_authenticated && allowed.contains(&role) => GuardDecision::Render,
            _ => GuardDecision::RedirectToLogin,
        },
    }
}

/// Guard bound to a live session
#[derive(Debug, Clone)]
pub struct RouteGuard {
    context: AuthContext,
}

impl RouteGuard {
    pub fn new(context: AuthContext) -> Self {
        Self { context }
    }

    /// Check `route` against the current session state
    pub fn check(&self, route: Route) -> GuardDecision {
        let state = self.context.state();
        let decision = decide(state.is_authenticated(), state.role(), &route.access_rule());
        if decision == GuardDecision::RedirectToLogin {
            tracing::debug!(route = %route, role = ?state.role(), "Route guard redirected to login");
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("/", Route::Root)]
    #[test_case("/login", Route::Login)]
    #[test_case("/admin", Route::Admin)]
    #[test_case("/doctor/patients/3", Route::Doctor)]
    #[test_case("patient", Route::Patient)]
    #[test_case("/technician?page=2", Route::Technician)]
    fn test_route_from_path(path: &str, expected: Route) {
        assert_eq!(path.parse::<Route>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_route() {
        assert!("/billing".parse::<Route>().is_err());
    }

    #[test]
    fn test_path_round_trip() {
        for route in Route::ALL {
            assert_eq!(route.path().parse::<Route>().unwrap(), route);
        }
    }

    #[test_case(Role::Admin, Route::Admin)]
    #[test_case(Role::Doctor, Route::Doctor)]
    #[test_case(Role::Patient, Route::Patient)]
    #[test_case(Role::LabTechnician, Route::Technician)]
    fn test_landing_routes(role: Role, expected: Route) {
        assert_eq!(Route::landing_for(role), expected);
        assert_eq!(
            decide(true, Some(role), &expected.access_rule()),
            GuardDecision::Render
        );
    }

    #[test]
    fn test_role_mismatch_redirects() {
        for route in [Route::Admin, Route::Doctor, Route::Patient] {
            let rule = route.access_rule();
            assert_eq!(
                decide(true, Some(Role::LabTechnician), &rule),
                GuardDecision::RedirectToLogin
            );
        }
    }

    #[test]
    fn test_anonymous_redirects_everywhere_but_login() {
        for route in Route::ALL {
            let expected = if route == Route::Login {
                GuardDecision::Render
            } else {
                GuardDecision::RedirectToLogin
            };
            assert_eq!(decide(false, None, &route.access_rule()), expected);
        }
    }

    #[test]
    fn test_root_always_redirects() {
        assert_eq!(
            decide(true, Some(Role::Admin), &Route::Root.access_rule()),
            GuardDecision::RedirectToLogin
        );
    }

    #[test]
    fn test_role_without_authentication_redirects() {
        assert_eq!(
            decide(false, Some(Role::Admin), &Route::Admin.access_rule()),
            GuardDecision::RedirectToLogin
        );
    }
}
