//! Per-role menu registry.
//!
//! Holds the static menu tree for every role. Trees are declared once at
//! registry construction; entries are flattened fresh on each resolution so
//! callers never observe shared mutable state.

use std::collections::HashMap;

use tracing::debug;

use super::{MenuChild, MenuEntry, MenuNode, flatten};
use crate::role::Role;

/// Registry of role-scoped menu trees.
#[derive(Debug)]
pub struct NavRegistry {
    menus: HashMap<Role, Vec<MenuNode>>,
}

impl NavRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            menus: HashMap::new(),
        }
    }

    /// Built-in LabOdc menus for all six roles.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Role::Talent, candidate_menu(false));
        registry.register(Role::TalentLeader, candidate_menu(true));
        registry.register(Role::Company, enterprise_menu());
        registry.register(Role::Mentor, mentor_menu());
        registry.register(Role::LabAdmin, lab_admin_menu());
        registry.register(Role::SystemAdmin, system_admin_menu());
        debug!(roles = registry.menus.len(), "menu registry built");
        registry
    }

    /// Register (or replace) the menu tree for a role.
    pub fn register(&mut self, role: Role, tree: Vec<MenuNode>) {
        self.menus.insert(role, tree);
    }

    /// The menu tree for a role; empty for unregistered roles.
    pub fn menu(&self, role: Role) -> &[MenuNode] {
        self.menus.get(&role).map(Vec::as_slice).unwrap_or_default()
    }

    /// Flattened navigable entries for a role, in declaration order.
    pub fn entries(&self, role: Role) -> Vec<MenuEntry> {
        flatten(self.menu(role))
    }
}

impl Default for NavRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn candidate_menu(leader: bool) -> Vec<MenuNode> {
    let mut nodes = vec![
        MenuNode::link("Dashboard", "/candidate/dashboard"),
        MenuNode::section("Workspace"),
        MenuNode::group(
            "Projects",
            vec![
                MenuChild::new("Browse projects", "/candidate/projects"),
                MenuChild::new("My applications", "/candidate/applications"),
            ],
        ),
        MenuNode::group(
            "Work",
            vec![
                MenuChild::new("Tasks", "/candidate/tasks"),
                MenuChild::new("Reports", "/candidate/reports"),
            ],
        ),
    ];

    let mut team = vec![
        MenuChild::new("My team", "/candidate/team"),
        MenuChild::new("Team votes", "/candidate/team/votes"),
    ];
    if leader {
        team.push(MenuChild::new("Manage members", "/candidate/team/manage"));
        team.push(MenuChild::new("Fund split", "/candidate/funds"));
    }
    nodes.push(MenuNode::group("Team", team));

    nodes
}

fn enterprise_menu() -> Vec<MenuNode> {
    vec![
        MenuNode::link("Dashboard", "/enterprise/dashboard"),
        MenuNode::group(
            "Projects",
            vec![
                MenuChild::new("My projects", "/enterprise/projects"),
                MenuChild::new("Post a project", "/enterprise/projects/create"),
            ],
        ),
        MenuNode::group(
            "Collaboration",
            vec![
                MenuChild::new("Mentors", "/enterprise/mentors"),
                MenuChild::new("Progress reports", "/enterprise/reports"),
            ],
        ),
        MenuNode::group(
            "Funding",
            vec![MenuChild::new("Payments", "/enterprise/funds")],
        ),
    ]
}

fn mentor_menu() -> Vec<MenuNode> {
    vec![
        MenuNode::link("Dashboard", "/mentor/dashboard"),
        MenuNode::group(
            "Mentoring",
            vec![
                MenuChild::new("Projects", "/mentor/projects"),
                MenuChild::new("Teams", "/mentor/teams"),
                MenuChild::new("Task review", "/mentor/tasks"),
            ],
        ),
        MenuNode::group(
            "Reporting",
            vec![MenuChild::new("Reports", "/mentor/reports")],
        ),
    ]
}

fn lab_admin_menu() -> Vec<MenuNode> {
    vec![
        MenuNode::link("Dashboard", "/lab-admin/dashboard"),
        MenuNode::section("Operations"),
        MenuNode::group(
            "Approvals",
            vec![
                MenuChild::new("Project approvals", "/lab-admin/approvals/projects"),
                MenuChild::new("Mentor assignment", "/lab-admin/approvals/mentors"),
            ],
        ),
        MenuNode::group(
            "People",
            vec![
                MenuChild::new("Talents", "/lab-admin/talents"),
                MenuChild::new("Companies", "/lab-admin/companies"),
                MenuChild::new("Teams", "/lab-admin/teams"),
            ],
        ),
        MenuNode::group(
            "Funding",
            vec![MenuChild::new("Distributions", "/lab-admin/funds")],
        ),
    ]
}

fn system_admin_menu() -> Vec<MenuNode> {
    vec![
        MenuNode::link("Dashboard", "/system-admin/dashboard"),
        MenuNode::group(
            "Administration",
            vec![
                MenuChild::new("Users", "/system-admin/users"),
                MenuChild::new("Labs", "/system-admin/labs"),
            ],
        ),
        MenuNode::group(
            "Settings",
            vec![
                MenuChild::new("Email templates", "/system-admin/email-templates"),
                MenuChild::new("System settings", "/system-admin/settings"),
            ],
        ),
    ]
}
