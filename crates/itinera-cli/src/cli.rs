//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Itinera CLI - Parse free-text travel itineraries into structured records.
#[derive(Debug, Parser)]
#[command(name = "itinera")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "ITINERA_CONFIG")]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Pretty-printed JSON record
    Json,
    /// Summary and day tables
    Table,
    /// Plain-text document rendering
    Text,
    /// Slug only
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse an itinerary document
    Parse(ParseArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the parse command.
#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// Document to parse
    pub file: Option<String>,

    /// Read the document from stdin
    #[arg(long, conflicts_with = "file")]
    pub stdin: bool,

    /// Use the LLM-assisted extractor instead of the heuristic parser
    #[arg(long)]
    pub llm: bool,

    /// Model name (overrides the config file)
    #[arg(short, long, requires = "llm")]
    pub model: Option<String>,

    /// LLM endpoint URL (overrides the config file)
    #[arg(short, long, requires = "llm")]
    pub endpoint: Option<String>,

    /// Write `<slug>.json` into this directory
    #[arg(short, long)]
    pub out_dir: Option<String>,
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
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Text => crate::config::OutputFormat::Text,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_command() {
        let cli = Cli::parse_from(["itinera", "parse", "trip.txt", "--out-dir", "out"]);
        match cli.command {
            Command::Parse(args) => {
                assert_eq!(args.file.as_deref(), Some("trip.txt"));
                assert_eq!(args.out_dir.as_deref(), Some("out"));
                assert!(!args.llm);
            }
            _ => panic!("Expected Parse command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["itinera", "parse", "--stdin", "-f", "quiet", "-v"]);
        assert_eq!(cli.format, Some(CliFormat::Quiet));
        assert!(cli.verbose);
    }

    #[test]
    fn test_model_requires_llm() {
        let result = Cli::try_parse_from(["itinera", "parse", "trip.txt", "--model", "mistral"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from(["itinera", "parse", "trip.txt", "--llm", "--model", "mistral"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["itinera", "config", "init", "--force"]);
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            }) => assert!(force),
            _ => panic!("Expected config init"),
        }
    }

    #[test]
    fn test_format_conversion() {
        let format: OutputFormat = CliFormat::Text.into();
        assert_eq!(format, OutputFormat::Text);
    }
}
