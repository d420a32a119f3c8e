//! `guida export` command implementation.

use clap::Args;
use guida_config::Config;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    pub(crate) config: ConfigArgs,

    /// Print on a single line instead of pretty-printing.
    #[arg(long)]
    compact: bool,
}

impl ExportArgs {
    /// Execute the export command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;
        output.data(&render(&config, self.compact)?);
        Ok(())
    }
}

/// Serialize the exported configuration object.
fn render(config: &Config, compact: bool) -> Result<String, CliError> {
    let exported = config.export();
    let json = if compact {
        serde_json::to_string(&exported)?
    } else {
        serde_json::to_string_pretty(&exported)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_compact() {
        let config = Config::from_toml(
            r#"
[site]
title = "Guida"

[[sidebar]]
label = "Reference"
autogenerate = { directory = "reference" }
"#,
        )
        .unwrap();

        let json = render(&config, true).unwrap();

        assert_eq!(
            json,
            r#"{"title":"Guida","base":"/","image":{"service":"sharp"},"social":[],"sidebar":[{"label":"Reference","autogenerate":{"directory":"reference"}}]}"#
        );
    }

    #[test]
    fn test_render_pretty_is_multiline() {
        let config = Config::default();

        let json = render(&config, false).unwrap();

        assert!(json.lines().count() > 1);
        assert!(json.contains("\"title\": \"Guida\""));
    }
}
