//! Flags that shape how kiln talks to the terminal rather than what it
//! generates.
//!
//! Flattened into [`super::Cli`].

use clap::{Args, builder::FalseyValueParser};
use std::path::PathBuf;

/// Global arguments.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Stream tool output, log at DEBUG and make optional-step failures fatal.
    ///
    /// Long form only: `-v` prints the version.
    #[arg(
        long = "verbose",
        help = "Show detailed output and fail on install/git errors",
        long_help = "Show detailed output:
    - debug-level logging on stderr
    - npm/git output streamed to the terminal
    - the full cause chain on failure
    - a failed install or git step aborts the run instead of warning"
    )]
    pub verbose: bool,

    /// Suppress all non-error output.
    #[arg(
        short = 'q',
        long = "quiet",
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Automatically honoured when `NO_COLOR` is set in the environment
    /// (see <https://no-color.org>).
    #[arg(
        long = "no-color",
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Configuration file path.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,
}
