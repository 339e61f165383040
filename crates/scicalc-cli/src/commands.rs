//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// scicalc: drive a scientific calculator keypad from the command line
#[derive(Parser, Debug)]
#[command(name = "scicalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// YAML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run without an expression engine
    #[arg(long, global = true)]
    pub no_engine: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press a sequence of keys and print the final display
    Run(RunArgs),

    /// Read key sequences from stdin, one line at a time
    Repl(ReplArgs),

    /// List the named keys
    Keys,

    /// Show the effective configuration as YAML
    Config,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Key labels, e.g. `2 PLUS 2 EQUALS`
    #[arg(required = true, allow_hyphen_values = true, value_name = "KEY")]
    pub keys: Vec<String>,

    /// Print the display after every key
    #[arg(long)]
    pub trace: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

/// Arguments for the repl command
#[derive(Parser, Debug)]
pub struct ReplArgs {
    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable text
    Text,
    /// JSON
    Json,
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;
    use crate::output::OutputFormat;

    #[test]
    fn test_parse_run_command() {
        let cli = Cli::parse_from(["scicalc", "run", "2", "PLUS", "2", "EQUALS"]);
        if let Commands::Run(args) = cli.command {
            assert_eq!(args.keys, ["2", "PLUS", "2", "EQUALS"]);
            assert!(!args.trace);
            assert_eq!(args.format, None);
        } else {
            panic!("expected Run command");
        }
    }

    #[test]
    fn test_parse_run_with_hyphen_key() {
        let cli = Cli::parse_from(["scicalc", "run", "-3", "EQUALS"]);
        if let Commands::Run(args) = cli.command {
            assert_eq!(args.keys, ["-3", "EQUALS"]);
        } else {
            panic!("expected Run command");
        }
    }

    #[test]
    fn test_parse_run_with_options() {
        let cli = Cli::parse_from(["scicalc", "run", "--trace", "--format", "json", "1"]);
        if let Commands::Run(args) = cli.command {
            assert!(args.trace);
            assert_eq!(args.format, Some(FormatArg::Json));
        } else {
            panic!("expected Run command");
        }
    }

    #[test]
    fn test_run_requires_keys() {
        assert!(Cli::try_parse_from(["scicalc", "run"]).is_err());
    }

    #[test]
    fn test_parse_repl_keys_config() {
        assert!(matches!(
            Cli::parse_from(["scicalc", "repl"]).command,
            Commands::Repl(_)
        ));
        assert!(matches!(Cli::parse_from(["scicalc", "keys"]).command, Commands::Keys));
        assert!(matches!(Cli::parse_from(["scicalc", "config"]).command, Commands::Config));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "scicalc", "-vv", "--no-engine", "--config", "calc.yaml", "--color", "never", "keys",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_engine);
        assert_eq!(cli.config, Some(PathBuf::from("calc.yaml")));
        assert_eq!(ColorChoice::from(cli.color), ColorChoice::Never);
    }

    #[test]
    fn test_format_arg_conversion() {
        assert_eq!(OutputFormat::from(FormatArg::Text), OutputFormat::Text);
        assert_eq!(OutputFormat::from(FormatArg::Json), OutputFormat::Json);
    }
}
