//! Sidebar tree.
//!
//! [`Sidebar`] holds the top-level entries in declaration order and provides
//! depth-first traversal, structural validation and non-fatal lint checks.
//!
//! Entry locations use the declaration path, e.g. `sidebar[1].items[0]`
//! for the first child of the second top-level entry.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::entry::{NavigationEntry, is_blank};

/// Ordered sequence of top-level sidebar entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sidebar {
    entries: Vec<NavigationEntry>,
}

/// Entry reached during traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit<'a> {
    /// The entry.
    pub entry: &'a NavigationEntry,
    /// Index of the entry at each level, starting from the top level.
    pub path: Vec<usize>,
}

impl Visit<'_> {
    /// Nesting depth (0 for top-level entries).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Declaration path of the entry, e.g. `sidebar[1].items[0]`.
    #[must_use]
    pub fn location(&self) -> String {
        location(&self.path)
    }
}

/// Pre-order depth-first iterator over a [`Sidebar`].
///
/// Uses an explicit stack, so the walk itself does not recurse. Dropping,
/// cloning or comparing [`NavigationEntry`] values still recurses per level.
pub struct Walk<'a> {
    stack: Vec<(Vec<usize>, &'a NavigationEntry)>,
}

impl<'a> Walk<'a> {
    fn new(entries: &'a [NavigationEntry]) -> Self {
        let stack = entries
            .iter()
            .enumerate()
            .rev()
            .map(|(index, entry)| (vec![index], entry))
            .collect();
        Self { stack }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (path, entry) = self.stack.pop()?;

        for (index, child) in entry.items().iter().enumerate().rev() {
            let mut child_path = path.clone();
            child_path.push(index);
            self.stack.push((child_path, child));
        }

        Some(Visit { entry, path })
    }
}

impl Sidebar {
    /// Create a sidebar from top-level entries.
    #[must_use]
    pub fn new(entries: Vec<NavigationEntry>) -> Self {
        Self { entries }
    }

    /// Top-level entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    /// True if the sidebar has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Traverse every entry depth-first, parents before children.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.entries)
    }

    /// Total number of entries at all levels.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.walk().count()
    }

    /// Number of nesting levels (0 for an empty sidebar, 1 for a flat one).
    ///
    /// Equals the largest [`Visit::depth`] plus one.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.walk().map(|visit| visit.path.len()).max().unwrap_or(0)
    }

    /// Slugs of all link entries in traversal order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.walk().filter_map(|visit| visit.entry.slug())
    }

    /// Directories of all autogenerated groups in traversal order.
    pub fn autogenerated_directories(&self) -> impl Iterator<Item = &str> {
        self.walk().filter_map(|visit| visit.entry.directory())
    }

    /// Check structural invariants of every entry.
    ///
    /// Deserialized entries already satisfy them; this catches entries built
    /// in code. All violations are reported, not just the first.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing every violation found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        for visit in self.walk() {
            let entry = visit.entry;
            if is_blank(entry.label()) {
                issues.push(Issue::new(&visit, "label cannot be empty"));
            }
            match entry {
                NavigationEntry::Link { slug, .. } if is_blank(slug) => {
                    issues.push(Issue::new(&visit, "slug cannot be empty"));
                }
                NavigationEntry::Autogenerate { directory, .. } => {
                    if let Some(problem) = check_directory(directory) {
                        issues.push(Issue::new(&visit, problem));
                    }
                }
                _ => {}
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Collect non-fatal findings: duplicate sibling labels, slugs linked
    /// more than once, and groups without items.
    #[must_use]
    pub fn lint(&self) -> Vec<Lint> {
        let mut lints = Vec::new();

        lint_sibling_labels(&self.entries, &[], &mut lints);

        let mut first_seen: HashMap<&str, String> = HashMap::new();
        for visit in self.walk() {
            match visit.entry {
                NavigationEntry::Link { slug, .. } => {
                    if let Some(first) = first_seen.get(slug.as_str()) {
                        lints.push(Lint::DuplicateSlug {
                            slug: slug.clone(),
                            first: first.clone(),
                            location: visit.location(),
                        });
                    } else {
                        first_seen.insert(slug.as_str(), visit.location());
                    }
                }
                NavigationEntry::Group { label, items } => {
                    lint_sibling_labels(items, &visit.path, &mut lints);
                    if items.is_empty() {
                        lints.push(Lint::EmptyGroup {
                            label: label.clone(),
                            location: visit.location(),
                        });
                    }
                }
                NavigationEntry::Autogenerate { .. } => {}
            }
        }

        tracing::debug!(count = lints.len(), "Sidebar lint completed");
        lints
    }
}

impl From<Vec<NavigationEntry>> for Sidebar {
    fn from(entries: Vec<NavigationEntry>) -> Self {
        Self::new(entries)
    }
}

impl FromIterator<NavigationEntry> for Sidebar {
    fn from_iter<I: IntoIterator<Item = NavigationEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Sidebar {
    type Item = Visit<'a>;
    type IntoIter = Walk<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.walk()
    }
}

/// Record a lint for each label that repeats among `siblings`.
fn lint_sibling_labels(siblings: &[NavigationEntry], parent: &[usize], lints: &mut Vec<Lint>) {
    let mut seen = HashSet::new();
    for (index, entry) in siblings.iter().enumerate() {
        if !seen.insert(entry.label()) {
            let mut path = parent.to_vec();
            path.push(index);
            lints.push(Lint::DuplicateLabel {
                label: entry.label().to_owned(),
                location: location(&path),
            });
        }
    }
}

/// Problem with an autogenerate directory, if any.
fn check_directory(directory: &str) -> Option<&'static str> {
    if is_blank(directory) {
        return Some("autogenerate directory cannot be empty");
    }
    let path = Path::new(directory);
    if path.is_absolute() || directory.starts_with('/') {
        return Some("autogenerate directory must be relative to the content root");
    }
    if path.components().any(|c| c == Component::ParentDir) {
        return Some("autogenerate directory cannot contain `..`");
    }
    None
}

/// Format a declaration path.
fn location(path: &[usize]) -> String {
    let mut out = String::from("sidebar");
    for (level, index) in path.iter().enumerate() {
        if level > 0 {
            out.push_str(".items");
        }
        out.push('[');
        out.push_str(&index.to_string());
        out.push(']');
    }
    out
}

/// Single validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Declaration path of the offending entry.
    pub location: String,
    /// What is wrong.
    pub message: String,
}

impl Issue {
    fn new(visit: &Visit<'_>, message: &str) -> Self {
        Self {
            location: visit.location(),
            message: message.to_owned(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Sidebar validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid sidebar: {}", join_issues(.issues))]
pub struct ValidationError {
    /// Every violation found, in traversal order.
    pub issues: Vec<Issue>,
}

fn join_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Non-fatal sidebar finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lint {
    /// Two siblings share a label.
    DuplicateLabel { label: String, location: String },
    /// The same slug is linked from more than one entry.
    DuplicateSlug {
        slug: String,
        first: String,
        location: String,
    },
    /// Manual group with no items.
    EmptyGroup { label: String, location: String },
}

impl fmt::Display for Lint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateLabel { label, location } => {
                write!(f, "{location}: label `{label}` is repeated among siblings")
            }
            Self::DuplicateSlug {
                slug,
                first,
                location,
            } => write!(f, "{location}: slug `{slug}` is already linked at {first}"),
            Self::EmptyGroup { label, location } => {
                write!(f, "{location}: group `{label}` has no items")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn oop() -> NavigationEntry {
        NavigationEntry::group(
            "OOP",
            [
                NavigationEntry::group(
                    "Ereditarietà",
                    [NavigationEntry::link("Ereditarietà", "ereditarietà")],
                ),
                NavigationEntry::group(
                    "Polimorfismo",
                    [NavigationEntry::link("Polimorfismo", "esempio")],
                ),
            ],
        )
    }

    fn course_sidebar() -> Sidebar {
        Sidebar::new(vec![
            NavigationEntry::group(
                "Programmazione Procedurale",
                [NavigationEntry::link("Guida", "guides/example")],
            ),
            oop(),
            NavigationEntry::group(
                "MAUI",
                [NavigationEntry::link("Example Guide", "guides/example")],
            ),
            NavigationEntry::autogenerate("Reference", "reference"),
        ])
    }

    fn walk_summary(sidebar: &Sidebar) -> Vec<(usize, String, &'static str)> {
        sidebar
            .walk()
            .map(|visit| {
                let kind = match visit.entry {
                    NavigationEntry::Link { .. } => "leaf",
                    NavigationEntry::Group { .. } => "group",
                    NavigationEntry::Autogenerate { .. } => "auto",
                };
                (visit.depth(), visit.entry.label().to_owned(), kind)
            })
            .collect()
    }

    #[test]
    fn test_walk_is_depth_first_pre_order() {
        let sidebar = Sidebar::new(vec![oop()]);

        let visited = walk_summary(&sidebar);

        assert_eq!(
            visited,
            vec![
                (0, "OOP".to_owned(), "group"),
                (1, "Ereditarietà".to_owned(), "group"),
                (2, "Ereditarietà".to_owned(), "leaf"),
                (1, "Polimorfismo".to_owned(), "group"),
                (2, "Polimorfismo".to_owned(), "leaf"),
            ]
        );
    }

    #[test]
    fn test_walk_preserves_declaration_order() {
        let sidebar: Sidebar = ["Zeta", "Alpha", "Mu"]
            .into_iter()
            .map(|label| NavigationEntry::link(label, label.to_lowercase()))
            .collect();

        let labels: Vec<_> = sidebar.walk().map(|v| v.entry.label()).collect();

        assert_eq!(labels, vec!["Zeta", "Alpha", "Mu"]);
    }

    #[test]
    fn test_walk_does_not_descend_into_autogenerate() {
        let sidebar = Sidebar::new(vec![NavigationEntry::autogenerate("Reference", "reference")]);

        let visits: Vec<_> = sidebar.walk().collect();

        assert_eq!(visits.len(), 1);
        assert!(visits[0].entry.items().is_empty());
        assert_eq!(visits[0].entry.directory(), Some("reference"));
    }

    #[test]
    fn test_walk_empty_sidebar() {
        let sidebar = Sidebar::default();

        assert!(sidebar.is_empty());
        assert_eq!(sidebar.walk().count(), 0);
        assert_eq!(sidebar.level_count(), 0);
    }

    #[test]
    fn test_walk_terminates_on_deep_nesting() {
        let mut entry = NavigationEntry::link("Leaf", "leaf");
        for level in 0..1_000 {
            entry = NavigationEntry::group(format!("Level {level}"), [entry]);
        }
        let sidebar = Sidebar::new(vec![entry]);

        assert_eq!(sidebar.entry_count(), 1_001);
        assert_eq!(sidebar.level_count(), 1_001);
    }

    #[test]
    fn test_visit_location() {
        let sidebar = course_sidebar();

        let locations: Vec<_> = sidebar
            .walk()
            .filter(|v| v.entry.label() == "Polimorfismo")
            .map(|v| v.location())
            .collect();

        assert_eq!(
            locations,
            vec!["sidebar[1].items[1]", "sidebar[1].items[1].items[0]"]
        );
    }

    #[test]
    fn test_queries() {
        let sidebar = course_sidebar();

        assert_eq!(sidebar.entries().len(), 4);
        assert_eq!(sidebar.entry_count(), 10);
        assert_eq!(sidebar.level_count(), 3);
        assert_eq!(
            sidebar.slugs().collect::<Vec<_>>(),
            vec!["guides/example", "ereditarietà", "esempio", "guides/example"]
        );
        assert_eq!(
            sidebar.autogenerated_directories().collect::<Vec<_>>(),
            vec!["reference"]
        );
    }

    #[test]
    fn test_into_iterator_matches_walk() {
        let sidebar = course_sidebar();

        let count = (&sidebar).into_iter().count();

        assert_eq!(count, sidebar.walk().count());
    }

    #[test]
    fn test_validate_accepts_course_sidebar() {
        assert!(course_sidebar().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let sidebar = Sidebar::new(vec![
            NavigationEntry::link("", "page"),
            NavigationEntry::group("Group", [NavigationEntry::link("Blank slug", " ")]),
            NavigationEntry::autogenerate("Auto", ""),
        ]);

        let err = sidebar.validate().unwrap_err();

        assert_eq!(
            err.issues,
            vec![
                Issue {
                    location: "sidebar[0]".to_owned(),
                    message: "label cannot be empty".to_owned(),
                },
                Issue {
                    location: "sidebar[1].items[0]".to_owned(),
                    message: "slug cannot be empty".to_owned(),
                },
                Issue {
                    location: "sidebar[2]".to_owned(),
                    message: "autogenerate directory cannot be empty".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_validate_rejects_absolute_directory() {
        let sidebar = Sidebar::new(vec![NavigationEntry::autogenerate("Auto", "/reference")]);

        let err = sidebar.validate().unwrap_err();

        assert!(err.to_string().contains("relative to the content root"));
    }

    #[test]
    fn test_validate_rejects_parent_directory() {
        let sidebar = Sidebar::new(vec![NavigationEntry::autogenerate("Auto", "docs/../secret")]);

        let err = sidebar.validate().unwrap_err();

        assert!(err.to_string().contains("`..`"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError {
            issues: vec![
                Issue {
                    location: "sidebar[0]".to_owned(),
                    message: "label cannot be empty".to_owned(),
                },
                Issue {
                    location: "sidebar[1]".to_owned(),
                    message: "slug cannot be empty".to_owned(),
                },
            ],
        };

        assert_eq!(
            err.to_string(),
            "invalid sidebar: sidebar[0]: label cannot be empty; sidebar[1]: slug cannot be empty"
        );
    }

    #[test]
    fn test_lint_duplicate_slug() {
        let lints = course_sidebar().lint();

        assert_eq!(
            lints,
            vec![Lint::DuplicateSlug {
                slug: "guides/example".to_owned(),
                first: "sidebar[0].items[0]".to_owned(),
                location: "sidebar[2].items[0]".to_owned(),
            }]
        );
    }

    #[test]
    fn test_lint_duplicate_sibling_labels() {
        let sidebar = Sidebar::new(vec![
            NavigationEntry::link("Guide", "a"),
            NavigationEntry::group(
                "Nested",
                [
                    NavigationEntry::link("Same", "b"),
                    NavigationEntry::link("Same", "c"),
                ],
            ),
            NavigationEntry::link("Guide", "d"),
        ]);

        let lints = sidebar.lint();

        assert_eq!(
            lints,
            vec![
                Lint::DuplicateLabel {
                    label: "Guide".to_owned(),
                    location: "sidebar[2]".to_owned(),
                },
                Lint::DuplicateLabel {
                    label: "Same".to_owned(),
                    location: "sidebar[1].items[1]".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_lint_parent_and_child_sharing_label_is_fine() {
        let sidebar = Sidebar::new(vec![oop()]);

        assert!(sidebar.lint().is_empty());
    }

    #[test]
    fn test_lint_empty_group() {
        let sidebar = Sidebar::new(vec![NavigationEntry::group("MAUI", [])]);

        let lints = sidebar.lint();

        assert_eq!(
            lints,
            vec![Lint::EmptyGroup {
                label: "MAUI".to_owned(),
                location: "sidebar[0]".to_owned(),
            }]
        );
        assert_eq!(lints[0].to_string(), "sidebar[0]: group `MAUI` has no items");
    }

    #[test]
    fn test_sidebar_serializes_as_sequence() {
        let sidebar = Sidebar::new(vec![NavigationEntry::link("Guida", "guides/example")]);

        let json = serde_json::to_value(&sidebar).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{ "label": "Guida", "slug": "guides/example" }])
        );
    }
}
