//! scicalc: scientific calculator keypad on the command line
//!
//! ## Usage
//!
//! ```bash
//! scicalc run 2 PLUS 2 EQUALS         # Press keys, print the display
//! scicalc run --trace SHIFT SIN 1     # Print the display after every key
//! echo "1 PLUS 1 EQUALS" | scicalc repl
//! scicalc keys                        # List named keys
//! scicalc --config calc.yaml config   # Show effective configuration
//! ```

use clap::Parser;
use scicalc_cli::{Cli, CliConfig, CliResult, ColorChoice, Commands, KeyRunner, Verbosity};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    init_tracing(config.verbosity);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Run(args) => {
            let config = match args.format {
                Some(format) => config.with_format(format.into()),
                None => config,
            };
            KeyRunner::new(config).run_and_report(&args.keys, args.trace, &mut out)
        }
        Commands::Repl(args) => {
            let config = match args.format {
                Some(format) => config.with_format(format.into()),
                None => config,
            };
            KeyRunner::new(config).repl(io::stdin().lock(), &mut out)?;
            Ok(())
        }
        Commands::Keys => KeyRunner::new(config).keys(&mut out),
        Commands::Config => {
            out.write_all(config.to_yaml()?.as_bytes())?;
            Ok(())
        }
    }
}

/// File settings first, then command-line overrides
fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::new(),
    };

    if cli.quiet || cli.verbose > 0 {
        config = config.with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose));
    }
    let color: ColorChoice = cli.color.clone().into();
    if color != ColorChoice::Auto {
        config = config.with_color(color);
    }
    if cli.no_engine {
        config = config.with_engine(false);
    }
    Ok(config)
}

/// Logs go to stderr; `RUST_LOG` overrides the verbosity flags
fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
