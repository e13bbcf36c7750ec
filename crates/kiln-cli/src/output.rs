//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    ///
    /// Colour is dropped when stdout is not a terminal.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || !io::stdout().is_terminal(),
            term: Term::stdout(),
        }
    }

    /// Write `line` to stdout unless quiet.
    fn emit(&self, line: String) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&line)
    }

    /// `<symbol> <msg>`, coloured by `paint` when colour is on.
    fn marked(&self, symbol: &str, msg: &str, paint: fn(&str) -> String) -> String {
        if self.no_color {
            format!("{symbol} {msg}")
        } else {
            format!("{} {}", paint(symbol).bold(), paint(msg))
        }
    }

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.emit(msg.to_owned())
    }

    /// `✓ <msg>`
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.emit(self.marked("\u{2713}", msg, |s| s.green().to_string()))
    }

    /// `ℹ <msg>`
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.emit(self.marked("\u{2139}", msg, |s| s.blue().to_string()))
    }

    /// `⚠ <msg>` on stderr.
    ///
    /// Survives `--quiet`: a skipped step changes what the user has to do
    /// next.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        Term::stderr().write_line(&self.marked("\u{26a0}", msg, |s| s.yellow().to_string()))
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.emit(line)
    }

    /// Indented command the user is expected to type.
    pub fn command(&self, cmd: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("  {cmd}")
        } else {
            format!("  {}", cmd.bold())
        };
        self.emit(line)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
