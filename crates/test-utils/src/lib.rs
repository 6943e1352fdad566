//! LabOdc test utilities.
//!
//! JSON fixtures shared by the nav and client test suites: canned auth
//! envelopes, user objects in the backend's wire format, and a builder for
//! role menu trees.

use serde_json::{Value as JsonValue, json};
use uuid::Uuid;

/// Build a user object in the backend's wire format.
pub fn user_json(role: &str) -> JsonValue {
    json!({
        "id": Uuid::now_v7(),
        "name": "Test Talent",
        "mail": "talent@labodc.example",
        "role": role,
    })
}

/// Wrap a payload in the backend's success envelope.
pub fn envelope(data: JsonValue) -> JsonValue {
    json!({ "success": true, "data": data })
}

/// Login response envelope carrying a full session triple.
pub fn login_response(access_token: &str, refresh_token: &str, role: &str) -> JsonValue {
    envelope(json!({
        "access_token": access_token,
        "refresh_token": refresh_token,
        "user": user_json(role),
    }))
}

/// Refresh response envelope carrying a rotated access token.
pub fn refresh_response(access_token: &str) -> JsonValue {
    envelope(json!({ "access_token": access_token }))
}

/// Error envelope with a message and optional field errors.
pub fn error_response(message: &str, errors: &[&str]) -> JsonValue {
    json!({ "message": message, "errors": errors })
}

/// Builder for role menu trees in the wire format the nav crate consumes.
#[derive(Debug, Default)]
pub struct MenuFixture {
    nodes: Vec<JsonValue>,
}

impl MenuFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level link node.
    pub fn link(mut self, title: &str, link: &str) -> Self {
        self.nodes.push(json!({ "title": title, "link": link }));
        self
    }

    /// Add a non-navigable section header.
    pub fn section(mut self, title: &str) -> Self {
        self.nodes.push(json!({ "title": title, "section": true }));
        self
    }

    /// Add a grouped node with child links given as (title, link) pairs.
    pub fn group(mut self, title: &str, children: &[(&str, &str)]) -> Self {
        let children: Vec<JsonValue> = children
            .iter()
            .map(|(title, link)| json!({ "title": title, "link": link }))
            .collect();
        self.nodes.push(json!({ "title": title, "children": children }));
        self
    }

    /// Finish the tree as a JSON array.
    pub fn build(self) -> JsonValue {
        JsonValue::Array(self.nodes)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn login_response_carries_triple() {
        let body = login_response("a", "r", "TALENT");
        assert_eq!(body["data"]["access_token"], "a");
        assert_eq!(body["data"]["refresh_token"], "r");
        assert_eq!(body["data"]["user"]["role"], "TALENT");
    }

    #[test]
    fn menu_fixture_preserves_declaration_order() {
        let tree = MenuFixture::new()
            .link("Dashboard", "/x/dashboard")
            .section("Divider")
            .group("Group", &[("A", "/x/a")])
            .build();

        let nodes = tree.as_array().unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0]["link"], "/x/dashboard");
        assert_eq!(nodes[1]["section"], true);
        assert_eq!(nodes[2]["children"][0]["link"], "/x/a");
    }
}
