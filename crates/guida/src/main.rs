//! Guida CLI - site configuration toolkit.
//!
//! Provides commands for:
//! - `check`: Validate the configuration and report sidebar warnings
//! - `tree`: Print the sidebar outline
//! - `export`: Print the configuration object as JSON

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ConfigArgs, ExportArgs, TreeArgs};
use output::Output;

/// Guida - site configuration toolkit.
#[derive(Parser)]
#[command(name = "guida", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration.
    Check(CheckArgs),
    /// Print the sidebar outline.
    Tree(TreeArgs),
    /// Print the configuration object as JSON.
    Export(ExportArgs),
}

impl Commands {
    fn config_args(&self) -> &ConfigArgs {
        match self {
            Self::Check(args) => &args.config,
            Self::Tree(args) => &args.config,
            Self::Export(args) => &args.config,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.command.config_args().verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Tree(args) => args.execute(),
        Commands::Export(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// Log filter: `--verbose` enables INFO, otherwise `RUST_LOG`, falling back to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}
