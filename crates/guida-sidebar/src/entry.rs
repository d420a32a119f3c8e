//! Sidebar entries.
//!
//! A [`NavigationEntry`] is one of three kinds:
//! - a link to a single content page (`slug`),
//! - a manually curated group of child entries (`items`),
//! - a group whose children are discovered by the site renderer from a
//!   content directory (`autogenerate`).
//!
//! The declaration format is a flat record with a `label` and exactly one
//! of the three target keys:
//!
//! ```toml
//! label = "Reference"
//! autogenerate = { directory = "reference" }
//! ```
//!
//! Records with no target, more than one target, or an empty label are
//! rejected while deserializing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A node in the sidebar tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEntry", into = "RawEntry")]
pub enum NavigationEntry {
    /// Link to a single content page.
    Link {
        /// Display label.
        label: String,
        /// Content page reference, resolved by the renderer.
        slug: String,
    },
    /// Manually curated group. Item order is display order.
    Group {
        /// Display label.
        label: String,
        /// Child entries.
        items: Vec<NavigationEntry>,
    },
    /// Group populated by the renderer from a content directory.
    Autogenerate {
        /// Display label.
        label: String,
        /// Content directory to scan, relative to the content root.
        directory: String,
    },
}

/// Discriminant of a [`NavigationEntry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Link,
    Group,
    Autogenerate,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Link => "link",
            Self::Group => "group",
            Self::Autogenerate => "autogenerate",
        })
    }
}

impl NavigationEntry {
    /// Create a link entry.
    pub fn link(label: impl Into<String>, slug: impl Into<String>) -> Self {
        Self::Link {
            label: label.into(),
            slug: slug.into(),
        }
    }

    /// Create a manually curated group.
    pub fn group(label: impl Into<String>, items: impl IntoIterator<Item = Self>) -> Self {
        Self::Group {
            label: label.into(),
            items: items.into_iter().collect(),
        }
    }

    /// Create a group populated from a content directory.
    pub fn autogenerate(label: impl Into<String>, directory: impl Into<String>) -> Self {
        Self::Autogenerate {
            label: label.into(),
            directory: directory.into(),
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Link { label, .. } | Self::Group { label, .. } | Self::Autogenerate { label, .. } => {
                label
            }
        }
    }

    /// Kind of this entry.
    #[must_use]
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Link { .. } => EntryKind::Link,
            Self::Group { .. } => EntryKind::Group,
            Self::Autogenerate { .. } => EntryKind::Autogenerate,
        }
    }

    /// Page slug for link entries.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::Link { slug, .. } => Some(slug),
            _ => None,
        }
    }

    /// Manually declared children.
    ///
    /// Empty for links and for autogenerated groups, whose children are
    /// supplied by the renderer.
    #[must_use]
    pub fn items(&self) -> &[NavigationEntry] {
        match self {
            Self::Group { items, .. } => items,
            _ => &[],
        }
    }

    /// Content directory for autogenerated groups.
    #[must_use]
    pub fn directory(&self) -> Option<&str> {
        match self {
            Self::Autogenerate { directory, .. } => Some(directory),
            _ => None,
        }
    }
}

/// Error for a sidebar record that does not describe a valid entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    /// Label missing or blank.
    #[error("sidebar entry must have a non-empty label")]
    EmptyLabel,
    /// None of `slug`, `items`, `autogenerate` set.
    #[error("sidebar entry `{label}` needs one of `slug`, `items` or `autogenerate`")]
    MissingTarget {
        /// Label of the offending entry.
        label: String,
    },
    /// More than one of `slug`, `items`, `autogenerate` set.
    #[error(
        "sidebar entry `{label}` sets {targets}; only one of `slug`, `items` or `autogenerate` is allowed"
    )]
    ConflictingTargets {
        /// Label of the offending entry.
        label: String,
        /// The keys that were set, e.g. "`slug`, `items`".
        targets: String,
    },
}

/// Declaration shape of an entry.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntry {
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Vec<NavigationEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    autogenerate: Option<AutogenerateDirective>,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct AutogenerateDirective {
    directory: String,
}

impl TryFrom<RawEntry> for NavigationEntry {
    type Error = EntryError;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        let RawEntry {
            label,
            slug,
            items,
            autogenerate,
        } = raw;

        if is_blank(&label) {
            return Err(EntryError::EmptyLabel);
        }

        match (slug, items, autogenerate) {
            (Some(slug), None, None) => Ok(Self::Link { label, slug }),
            (None, Some(items), None) => Ok(Self::Group { label, items }),
            (None, None, Some(auto)) => Ok(Self::Autogenerate {
                label,
                directory: auto.directory,
            }),
            (None, None, None) => Err(EntryError::MissingTarget { label }),
            (slug, items, autogenerate) => {
                let targets = [
                    slug.is_some().then_some("`slug`"),
                    items.is_some().then_some("`items`"),
                    autogenerate.is_some().then_some("`autogenerate`"),
                ]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(", ");
                Err(EntryError::ConflictingTargets { label, targets })
            }
        }
    }
}

impl From<NavigationEntry> for RawEntry {
    fn from(entry: NavigationEntry) -> Self {
        match entry {
            NavigationEntry::Link { label, slug } => Self {
                label,
                slug: Some(slug),
                items: None,
                autogenerate: None,
            },
            NavigationEntry::Group { label, items } => Self {
                label,
                slug: None,
                items: Some(items),
                autogenerate: None,
            },
            NavigationEntry::Autogenerate { label, directory } => Self {
                label,
                slug: None,
                items: None,
                autogenerate: Some(AutogenerateDirective { directory }),
            },
        }
    }
}

/// True for empty or whitespace-only strings.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
