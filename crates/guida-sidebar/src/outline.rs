//! Indented text outline of a sidebar.

use std::fmt;

use crate::entry::NavigationEntry;
use crate::sidebar::Sidebar;

/// Display adapter rendering one line per entry, two spaces per level.
///
/// ```text
/// OOP
///   Ereditarietà
///     Ereditarietà -> ereditarietà
/// Reference [autogenerate: reference]
/// ```
pub struct Outline<'a>(&'a Sidebar);

impl Sidebar {
    /// Outline of the tree for terminal display.
    #[must_use]
    pub fn outline(&self) -> Outline<'_> {
        Outline(self)
    }
}

impl fmt::Display for Outline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for visit in self.0.walk() {
            let indent = "  ".repeat(visit.depth());
            match visit.entry {
                NavigationEntry::Link { label, slug } => writeln!(f, "{indent}{label} -> {slug}")?,
                NavigationEntry::Group { label, .. } => writeln!(f, "{indent}{label}")?,
                NavigationEntry::Autogenerate { label, directory } => {
                    writeln!(f, "{indent}{label} [autogenerate: {directory}]")?;
                }
            }
        }
        Ok(())
    }
}
