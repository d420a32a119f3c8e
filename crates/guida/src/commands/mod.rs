//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod export;
pub(crate) mod tree;

use std::path::PathBuf;

use clap::Args;
use guida_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use export::ExportArgs;
pub(crate) use tree::TreeArgs;

/// Configuration arguments shared by every command.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover guida.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site title (overrides config).
    #[arg(long)]
    title: Option<String>,

    /// Deployed site URL (overrides config).
    #[arg(long)]
    url: Option<String>,

    /// Base path the site is served under (overrides config).
    #[arg(long)]
    base: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ConfigArgs {
    /// Load and validate configuration with CLI overrides applied.
    pub(crate) fn load(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            title: self.title.clone(),
            url: self.url.clone(),
            base: self.base.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::info!(
            path = ?config.config_path,
            title = %config.site.title,
            "Configuration loaded"
        );
        Ok(config)
    }
}
