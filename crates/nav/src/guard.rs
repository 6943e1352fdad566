//! Route guards.
//!
//! Pure gatekeeping decisions evaluated on every navigation: an
//! authentication check first, then role membership. Guards never mutate
//! state; callers perform the redirect the decision names.

use crate::role::Role;

/// Well-known redirect targets used by the guards.
pub mod routes {
    /// Login entry point for unauthenticated navigation.
    pub const LOGIN: &str = "/login";
    /// Landing page for role mismatches.
    pub const UNAUTHORIZED: &str = "/unauthorized";
}

/// Outcome of evaluating guards for a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Mount the requested route.
    Allow,
    /// No authenticated session; navigate to [`routes::LOGIN`].
    RedirectToLogin,
    /// Authenticated but the role is not permitted; navigate to
    /// [`routes::UNAUTHORIZED`].
    RedirectToUnauthorized,
}

/// Gate a route on an authenticated session being present.
pub fn auth_guard(authenticated: bool) -> RouteDecision {
    if authenticated {
        RouteDecision::Allow
    } else {
        RouteDecision::RedirectToLogin
    }
}

/// Gate a route on the session role being a member of `allowed`.
///
/// An absent or unknown role never matches.
pub fn role_guard(role: Option<Role>, allowed: &[Role]) -> RouteDecision {
    match role {
        Some(role) if allowed.contains(&role) => RouteDecision::Allow,
        _ => RouteDecision::RedirectToUnauthorized,
    }
}

/// Evaluate the auth guard, then the role guard, the order mounted routes
/// apply them.
pub fn guard_route(authenticated: bool, role: Option<Role>, allowed: &[Role]) -> RouteDecision {
    match auth_guard(authenticated) {
        RouteDecision::Allow => role_guard(role, allowed),
        decision => decision,
    }
}
