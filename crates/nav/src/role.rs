//! Role identifiers and default-route resolution.
//!
//! A role is fixed for the lifetime of a session and decides both the
//! default landing page and which menu subtree is visible.

use serde::{Deserialize, Serialize};

/// Landing route for unknown or absent roles.
pub const FALLBACK_ROUTE: &str = "/candidate/dashboard";

/// User role as assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SystemAdmin,
    LabAdmin,
    Company,
    Mentor,
    Talent,
    TalentLeader,
}

impl Role {
    /// All known roles, in registry order.
    pub const ALL: [Role; 6] = [
        Role::SystemAdmin,
        Role::LabAdmin,
        Role::Company,
        Role::Mentor,
        Role::Talent,
        Role::TalentLeader,
    ];

    /// Parse a wire-format role identifier (e.g. `"LAB_ADMIN"`).
    ///
    /// Returns `None` for unrecognized values; callers fall back via
    /// [`default_route`] rather than erroring.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SYSTEM_ADMIN" => Some(Role::SystemAdmin),
            "LAB_ADMIN" => Some(Role::LabAdmin),
            "COMPANY" => Some(Role::Company),
            "MENTOR" => Some(Role::Mentor),
            "TALENT" => Some(Role::Talent),
            "TALENT_LEADER" => Some(Role::TalentLeader),
            _ => None,
        }
    }

    /// Wire-format identifier for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::SystemAdmin => "SYSTEM_ADMIN",
            Role::LabAdmin => "LAB_ADMIN",
            Role::Company => "COMPANY",
            Role::Mentor => "MENTOR",
            Role::Talent => "TALENT",
            Role::TalentLeader => "TALENT_LEADER",
        }
    }

    /// Default dashboard route for this role.
    pub fn default_route(self) -> &'static str {
        match self {
            Role::SystemAdmin => "/system-admin/dashboard",
            Role::LabAdmin => "/lab-admin/dashboard",
            Role::Company => "/enterprise/dashboard",
            Role::Mentor => "/mentor/dashboard",
            Role::Talent | Role::TalentLeader => FALLBACK_ROUTE,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the landing route for an optional role.
///
/// Total: an absent role resolves to the candidate dashboard, never an error.
pub fn default_route(role: Option<Role>) -> &'static str {
    role.map(Role::default_route).unwrap_or(FALLBACK_ROUTE)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_roles() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn parse_unknown_role() {
        assert_eq!(Role::parse("SUPERVISOR"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("talent"), None);
    }

    #[test]
    fn every_role_has_a_route() {
        for role in Role::ALL {
            let route = role.default_route();
            assert!(route.starts_with('/'));
            assert!(!route.is_empty());
        }
    }

    #[test]
    fn absent_role_falls_back() {
        assert_eq!(default_route(None), FALLBACK_ROUTE);
        assert_eq!(default_route(Role::parse("NOT_A_ROLE")), FALLBACK_ROUTE);
    }

    #[test]
    fn leader_lands_on_candidate_dashboard() {
        assert_eq!(default_route(Some(Role::TalentLeader)), FALLBACK_ROUTE);
    }

    #[test]
    fn serde_uses_wire_format() {
        let json = serde_json::to_string(&Role::TalentLeader).unwrap();
        assert_eq!(json, "\"TALENT_LEADER\"");
        let role: Role = serde_json::from_str("\"LAB_ADMIN\"").unwrap();
        assert_eq!(role, Role::LabAdmin);
    }
}
