//! Menu trees and navigation entries.
//!
//! Menus are declared per role as a tree of nodes and flattened into an
//! ordered list of navigable entries for breadcrumb lookup and rendering.

mod registry;

pub use registry::NavRegistry;

use serde::{Deserialize, Serialize};

/// A child link under a grouped menu node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuChild {
    pub link: String,
    pub title: String,
}

impl MenuChild {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            title: title.into(),
        }
    }
}

/// A node in a role's menu tree.
///
/// A node either links somewhere directly, groups child links under its
/// title, or is a non-navigable section header. Trees are built once per
/// role and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuNode {
    pub title: String,
    #[serde(default)]
    pub link: Option<String>,
    /// Non-navigable divider; skipped during flattening.
    #[serde(default)]
    pub section: bool,
    #[serde(default)]
    pub children: Vec<MenuChild>,
}

impl MenuNode {
    /// A top-level node that links directly.
    pub fn link(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: Some(link.into()),
            section: false,
            children: Vec::new(),
        }
    }

    /// A node grouping child links under its title.
    pub fn group(title: impl Into<String>, children: Vec<MenuChild>) -> Self {
        Self {
            title: title.into(),
            link: None,
            section: false,
            children,
        }
    }

    /// A non-navigable section header.
    pub fn section(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: None,
            section: true,
            children: Vec::new(),
        }
    }
}

/// A flattened navigable entry derived from a menu tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub link: String,
    pub title: String,
    /// Title of the parent group; empty for top-level links.
    pub group_title: String,
}

/// Flatten a menu tree into navigable entries in declaration order.
///
/// Section headers are skipped entirely. A node with a direct link emits
/// one entry with an empty group title; its children (if any) follow, each
/// carrying the node's title as their group. A node with neither a link nor
/// children emits nothing.
pub fn flatten(nodes: &[MenuNode]) -> Vec<MenuEntry> {
    let mut entries = Vec::new();
    for node in nodes {
        if node.section {
            continue;
        }
        if let Some(link) = &node.link {
            entries.push(MenuEntry {
                link: link.clone(),
                title: node.title.clone(),
                group_title: String::new(),
            });
        }
        for child in &node.children {
            entries.push(MenuEntry {
                link: child.link.clone(),
                title: child.title.clone(),
                group_title: node.title.clone(),
            });
        }
    }
    entries
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use labodc_test_utils::MenuFixture;

    fn fixture_tree() -> Vec<MenuNode> {
        let json = MenuFixture::new()
            .link("Dashboard", "/candidate/dashboard")
            .section("Workspace")
            .group(
                "Projects",
                &[
                    ("Browse projects", "/candidate/projects"),
                    ("My applications", "/candidate/applications"),
                ],
            )
            .build();
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn flatten_preserves_declaration_order() {
        let entries = flatten(&fixture_tree());
        let links: Vec<&str> = entries.iter().map(|e| e.link.as_str()).collect();
        assert_eq!(
            links,
            [
                "/candidate/dashboard",
                "/candidate/projects",
                "/candidate/applications",
            ]
        );
    }

    #[test]
    fn flatten_is_deterministic() {
        let tree = fixture_tree();
        assert_eq!(flatten(&tree), flatten(&tree));
    }

    #[test]
    fn section_headers_are_skipped() {
        let entries = flatten(&fixture_tree());
        assert!(entries.iter().all(|e| e.title != "Workspace"));
    }

    #[test]
    fn direct_links_have_empty_group() {
        let entries = flatten(&fixture_tree());
        assert_eq!(entries[0].group_title, "");
        assert_eq!(entries[0].title, "Dashboard");
    }

    #[test]
    fn children_carry_parent_title_as_group() {
        let entries = flatten(&fixture_tree());
        assert_eq!(entries[1].group_title, "Projects");
        assert_eq!(entries[2].group_title, "Projects");
    }

    #[test]
    fn node_with_link_and_children_emits_both() {
        let node = MenuNode {
            title: "Projects".to_string(),
            link: Some("/projects".to_string()),
            section: false,
            children: vec![MenuChild::new("Create", "/projects/create")],
        };
        let entries = flatten(&[node]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].link, "/projects");
        assert_eq!(entries[0].group_title, "");
        assert_eq!(entries[1].link, "/projects/create");
        assert_eq!(entries[1].group_title, "Projects");
    }

    #[test]
    fn node_with_neither_emits_nothing() {
        let node = MenuNode {
            title: "Empty".to_string(),
            link: None,
            section: false,
            children: Vec::new(),
        };
        assert!(flatten(&[node]).is_empty());
    }
}
