//! Breadcrumb resolution against a role's flattened menu entries.
//!
//! Selection precedence: an exact link match wins outright; otherwise the
//! longest entry link that is a `/`-boundary prefix of the path wins, with
//! ties broken by declaration order (first declared wins). Resolution is a
//! pure function of the entries and the path.

use crate::menu::MenuEntry;

/// Breadcrumb display for the current location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Link of the matched entry, absent when nothing matched.
    pub link: Option<String>,
    pub title: String,
    /// Parent group title; empty when unmatched or top-level.
    pub group_title: String,
}

fn normalize(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Select the menu entry that best matches `path`.
///
/// Leading slashes are ignored on both sides. Returns `None` when no entry
/// equals the path or prefixes it on a segment boundary.
pub fn best_match<'a>(entries: &'a [MenuEntry], path: &str) -> Option<&'a MenuEntry> {
    let path = normalize(path);

    if let Some(exact) = entries.iter().find(|e| normalize(&e.link) == path) {
        return Some(exact);
    }

    let mut best: Option<&MenuEntry> = None;
    for entry in entries {
        let link = normalize(&entry.link);
        if link.is_empty() {
            continue;
        }
        let is_prefix = path
            .strip_prefix(link)
            .is_some_and(|rest| rest.starts_with('/'));
        if !is_prefix {
            continue;
        }
        // Strictly longer replaces; an equal length keeps the first declared.
        if best.is_none_or(|b| link.len() > normalize(&b.link).len()) {
            best = Some(entry);
        }
    }
    best
}

/// Resolve the breadcrumb display for `path`.
///
/// Falls back to the last non-empty path segment as the title when no entry
/// matches, so breadcrumbs always render something even for unregistered
/// routes.
pub fn resolve(entries: &[MenuEntry], path: &str) -> Breadcrumb {
    if let Some(entry) = best_match(entries, path) {
        return Breadcrumb {
            link: Some(entry.link.clone()),
            title: entry.title.clone(),
            group_title: entry.group_title.clone(),
        };
    }

    let title = normalize(path)
        .split('/')
        .rev()
        .find(|segment| !segment.is_empty())
        .unwrap_or_default()
        .to_string();

    Breadcrumb {
        link: None,
        title,
        group_title: String::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn entry(link: &str, title: &str, group: &str) -> MenuEntry {
        MenuEntry {
            link: link.to_string(),
            title: title.to_string(),
            group_title: group.to_string(),
        }
    }

    #[test]
    fn exact_match_wins() {
        let entries = [
            entry("projects", "Projects", ""),
            entry("projects/create", "Create project", "Projects"),
        ];
        let matched = best_match(&entries, "projects/create").unwrap();
        assert_eq!(matched.title, "Create project");
    }

    #[test]
    fn longest_prefix_wins() {
        let entries = [
            entry("projects", "Projects", ""),
            entry("projects/create", "Create project", "Projects"),
        ];
        let matched = best_match(&entries, "projects/create/step2").unwrap();
        assert_eq!(matched.link, "projects/create");
    }

    #[test]
    fn exact_match_beats_longer_prefix_candidate() {
        let entries = [entry("a", "A", ""), entry("a/b", "B", "A")];
        let matched = best_match(&entries, "a").unwrap();
        assert_eq!(matched.link, "a");
    }

    #[test]
    fn prefix_must_land_on_segment_boundary() {
        let entries = [entry("projects", "Projects", "")];
        assert!(best_match(&entries, "projectsarchive").is_none());
        assert!(best_match(&entries, "projects/42").is_some());
    }

    #[test]
    fn leading_slashes_are_ignored() {
        let entries = [entry("/candidate/tasks", "Tasks", "Work")];
        let matched = best_match(&entries, "candidate/tasks/7").unwrap();
        assert_eq!(matched.title, "Tasks");
    }

    #[test]
    fn equal_length_duplicate_links_keep_first_declared() {
        let entries = [
            entry("team", "Team (first)", ""),
            entry("team", "Team (second)", ""),
        ];
        let matched = best_match(&entries, "team/votes").unwrap();
        assert_eq!(matched.title, "Team (first)");
    }

    #[test]
    fn no_match_yields_none() {
        let entries = [entry("projects", "Projects", "")];
        assert!(best_match(&entries, "reports/weekly").is_none());
    }

    #[test]
    fn fallback_uses_last_segment() {
        let crumb = resolve(&[], "unregistered/deep/path");
        assert_eq!(crumb.title, "path");
        assert_eq!(crumb.group_title, "");
        assert_eq!(crumb.link, None);
    }

    #[test]
    fn fallback_skips_trailing_slash() {
        let crumb = resolve(&[], "/reports/weekly/");
        assert_eq!(crumb.title, "weekly");
    }

    #[test]
    fn empty_path_yields_empty_title() {
        let crumb = resolve(&[], "/");
        assert_eq!(crumb.title, "");
        assert_eq!(crumb.group_title, "");
    }

    #[test]
    fn resolved_match_carries_group() {
        let entries = [entry("candidate/tasks", "Tasks", "Work")];
        let crumb = resolve(&entries, "candidate/tasks");
        assert_eq!(crumb.link.as_deref(), Some("candidate/tasks"));
        assert_eq!(crumb.title, "Tasks");
        assert_eq!(crumb.group_title, "Work");
    }
}
