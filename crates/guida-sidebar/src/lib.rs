//! Sidebar navigation model for Guida.
//!
//! This crate provides:
//! - [`NavigationEntry`]: a sidebar node, either a page link, a manual group
//!   or a group autogenerated by the renderer from a content directory
//! - [`Sidebar`]: the ordered tree of entries with depth-first traversal,
//!   validation and lint checks
//!
//! The tree is declared once and never mutated. Slugs and autogenerate
//! directories are passed through to the site renderer unresolved.
//!
//! # Quick Start
//!
//! ```
//! use guida_sidebar::{NavigationEntry, Sidebar};
//!
//! let sidebar = Sidebar::new(vec![
//!     NavigationEntry::group(
//!         "OOP",
//!         [NavigationEntry::link("Polimorfismo", "esempio")],
//!     ),
//!     NavigationEntry::autogenerate("Reference", "reference"),
//! ]);
//!
//! assert!(sidebar.validate().is_ok());
//! let labels: Vec<_> = sidebar.walk().map(|v| v.entry.label()).collect();
//! assert_eq!(labels, ["OOP", "Polimorfismo", "Reference"]);
//! ```

mod entry;
mod outline;
mod sidebar;

pub use entry::{EntryError, EntryKind, NavigationEntry};
pub use outline::Outline;
pub use sidebar::{Issue, Lint, Sidebar, ValidationError, Visit, Walk};
