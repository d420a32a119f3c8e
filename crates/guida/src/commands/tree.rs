//! `guida tree` command implementation.

use clap::Args;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    pub(crate) config: ConfigArgs,
}

impl TreeArgs {
    /// Execute the tree command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;

        output.highlight(&config.site.title);
        if config.sidebar.is_empty() {
            output.warning("Sidebar is empty");
            return Ok(());
        }
        output.data(&config.sidebar.outline().to_string());

        Ok(())
    }
}
