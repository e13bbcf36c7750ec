//! # kiln
//!
//! Scaffold an Express + MongoDB backend in one command.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults, file, `KILN_*` env).
//! 4. Build the [`OutputManager`].
//! 5. Run the scaffold command.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                          |
//! |------|----------------------------------|
//! |  0   | Success (warnings allowed)       |
//! |  1   | Scaffold or configuration failed |
//! |  2   | Invalid arguments                |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::Cli,
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod progress;

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init.
    let _ = dotenvy::dotenv();

    // `exit` prints help/version to stdout with code 0 and usage errors to
    // stderr with code 2.
    let cli = Cli::try_parse().unwrap_or_else(|e| e.exit());

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        name = %cli.name,
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        dry_run = cli.scaffold.dry_run,
        "CLI started"
    );

    let verbose = cli.global.verbose;
    let stderr_tty = std::io::stderr().is_terminal();

    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            let colored = color_enabled(cli.global.no_color, false, stderr_tty);
            return report_failure(e, verbose, colored);
        }
    };
    let colored = color_enabled(cli.global.no_color, config.output.no_color, stderr_tty);

    match run(cli, config) {
        Ok(()) => {
            info!("kiln completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => report_failure(e, verbose, colored),
    }
}

/// Hand the parsed arguments and loaded configuration to the scaffold command.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig) -> CliResult<()> {
    let output = OutputManager::new(&cli.global, &config);
    commands::scaffold::execute(cli.name, cli.scaffold, cli.global, config, output)
}

/// Colour on stderr needs a TTY and no opt-out from either the flag or the config file.
fn color_enabled(flag_no_color: bool, config_no_color: bool, stderr_tty: bool) -> bool {
    stderr_tty && !flag_no_color && !config_no_color
}

/// Translate a `CliError` into a user message and an exit code.
fn report_failure(err: CliError, verbose: bool, colored: bool) -> ExitCode {
    err.log();

    let msg = if colored {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
