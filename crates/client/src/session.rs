//! Session and user types.

use chrono::{DateTime, Utc};
use labodc_nav::role::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated user profile cached alongside the tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    #[serde(alias = "email")]
    pub mail: String,
    /// Wire-format role identifier as sent by the backend. Unrecognized
    /// values are kept verbatim; [`AuthUser::role`] resolves them leniently.
    pub role: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl AuthUser {
    /// The parsed role, `None` when the backend sent an unknown identifier.
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}

/// An authenticated client session.
///
/// Either fully present (all three fields) or absent; partial state is
/// never a valid persisted form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: AuthUser,
}

/// Persisted UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Parse the persisted form (`"light"` / `"dark"`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn user_accepts_email_alias() {
        let user: AuthUser = serde_json::from_value(serde_json::json!({
            "id": "0191c2a4-7e6e-7bbb-8888-123456789abc",
            "name": "Ada",
            "email": "ada@labodc.example",
            "role": "MENTOR",
        }))
        .unwrap();
        assert_eq!(user.mail, "ada@labodc.example");
        assert_eq!(user.role(), Some(Role::Mentor));
    }

    #[test]
    fn unknown_role_resolves_to_none() {
        let user: AuthUser = serde_json::from_value(serde_json::json!({
            "id": "0191c2a4-7e6e-7bbb-8888-123456789abc",
            "name": "Ada",
            "mail": "ada@labodc.example",
            "role": "SUPERVISOR",
        }))
        .unwrap();
        assert_eq!(user.role(), None);
        assert_eq!(
            labodc_nav::role::default_route(user.role()),
            labodc_nav::role::FALLBACK_ROUTE
        );
    }

    #[test]
    fn theme_round_trips_through_persisted_form() {
        assert_eq!(Theme::parse("light"), Some(Theme::Light));
        assert_eq!(Theme::parse(Theme::Dark.as_str()), Some(Theme::Dark));
        assert_eq!(Theme::parse("sepia"), None);
    }
}
