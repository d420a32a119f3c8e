//! `guida check` command implementation.

use clap::Args;
use guida_sidebar::{EntryKind, Sidebar};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub(crate) config: ConfigArgs,

    /// Fail when the sidebar has warnings.
    #[arg(long)]
    strict: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, or has sidebar
    /// warnings under `--strict`.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;

        match &config.config_path {
            Some(path) => output.info(&format!("Config: {}", path.display())),
            None => output.info("Config: defaults (no guida.toml found)"),
        }
        output.info(&format!("Title: {}", config.site.title));
        output.info(&format!("Base: {}", config.site.base));
        output.info(&format!("Social links: {}", config.social.len()));
        output.info(&format!("Sidebar: {}", summarize(&config.sidebar)));

        let lints = config.sidebar.lint();
        for lint in &lints {
            output.warning(&format!("warning: {lint}"));
        }

        if self.strict && !lints.is_empty() {
            return Err(CliError::Validation(format!(
                "{} sidebar warning(s) with --strict",
                lints.len()
            )));
        }

        output.success("Configuration is valid");
        Ok(())
    }
}

/// One-line description of the sidebar shape.
fn summarize(sidebar: &Sidebar) -> String {
    let (mut links, mut groups, mut autogenerated) = (0, 0, 0);
    for visit in sidebar {
        match visit.entry.kind() {
            EntryKind::Link => links += 1,
            EntryKind::Group => groups += 1,
            EntryKind::Autogenerate => autogenerated += 1,
        }
    }
    format!(
        "{} top-level entries, {links} links, {groups} groups, {autogenerated} autogenerated, {} levels",
        sidebar.entries().len(),
        sidebar.level_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use guida_sidebar::NavigationEntry;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summarize_counts_kinds() {
        let sidebar = Sidebar::new(vec![
            NavigationEntry::group(
                "OOP",
                [NavigationEntry::group(
                    "Interfacce",
                    [
                        NavigationEntry::link("IComparer", "icomparer"),
                        NavigationEntry::link("IEquatable", "iequitable"),
                    ],
                )],
            ),
            NavigationEntry::autogenerate("Reference", "reference"),
        ]);

        assert_eq!(
            summarize(&sidebar),
            "2 top-level entries, 2 links, 2 groups, 1 autogenerated, 3 levels"
        );
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(
            summarize(&Sidebar::default()),
            "0 top-level entries, 0 links, 0 groups, 0 autogenerated, 0 levels"
        );
    }
}
