//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Provenance CLI - Turn museum provenance text into structured timelines.
#[derive(Debug, Parser)]
#[command(name = "provenance")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PROVENANCE_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON period records
    Json,
    /// Regenerated provenance text
    Text,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse provenance text into periods
    Parse(InputArgs),

    /// Report whether each period renders back to the same record
    Check(CheckArgs),

    /// Rebuild provenance from a JSON array of period records
    Rebuild(InputArgs),

    /// Show or change configuration
    Config(ConfigArgs),
}

/// Where command input comes from.
#[derive(Debug, Parser)]
pub struct InputArgs {
    /// Inline input text
    pub text: Option<String>,

    /// Read input from a file
    #[arg(long)]
    pub file: Option<String>,

    /// Read input from stdin
    #[arg(long)]
    pub stdin: bool,
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Compare dates exactly instead of by earliest/latest bounds
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the active configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Change one setting
    Set {
        /// Setting key, e.g. `color` or `extractor.recursion_limit`
        key: String,
        /// New value
        value: String,
    },

    /// Restore the defaults
    Reset,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Text => crate::config::OutputFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        let cli = Cli::parse_from(["provenance", "parse", "John Smith, Paris, 1950"]);
        match cli.command {
            Command::Parse(args) => assert_eq!(args.text.as_deref(), Some("John Smith, Paris, 1950")),
            _ => panic!("Expected Parse command"),
        }
    }

    #[test]
    fn test_check_strict_with_file() {
        let cli = Cli::parse_from(["provenance", "check", "--strict", "--file", "record.txt"]);
        match cli.command {
            Command::Check(args) => {
                assert!(args.strict);
                assert_eq!(args.input.file.as_deref(), Some("record.txt"));
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_global_format() {
        let cli = Cli::parse_from(["provenance", "rebuild", "--stdin", "--format", "text"]);
        assert!(matches!(cli.format, Some(CliFormat::Text)));
    }

    #[test]
    fn test_config_set() {
        let cli = Cli::parse_from(["provenance", "config", "set", "color", "false"]);
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Set { key, value },
            }) => {
                assert_eq!(key, "color");
                assert_eq!(value, "false");
            }
            _ => panic!("Expected Config set"),
        }
    }
}
