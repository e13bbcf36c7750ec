//! Error handling for the kiln CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use kiln_core::error::{ErrorCategory, KilnError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Every way a kiln invocation can fail after arguments were parsed.
#[derive(Debug, Error)]
pub enum CliError {
    /// An error propagated from `kiln-core`, possibly tagged with the
    /// stage it happened at.
    #[error(transparent)]
    Core(#[from] KilnError),

    /// A configuration file or `KILN_*` variable could not be used.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// An I/O operation outside the scaffold run failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    pub fn config(
        message: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The one-line message shown to the user.
    ///
    /// Stage attribution is peeled off core errors; it is shown separately.
    pub fn headline(&self) -> String {
        match self {
            Self::Core(err) => err.root().to_string(),
            other => other.to_string(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Core(core_err) => core_err.suggestions(),
            Self::ConfigError { .. } => vec![
                "Check your config file (see --config) and KILN_* environment variables".into(),
                "Delete the file to fall back to built-in defaults".into(),
            ],
            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "Make sure the current directory still exists".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Core(core) => core.category(),
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError { .. } => ErrorCategory::Filesystem,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// Every failure after argument parsing exits with 1; clap exits with 2
    /// on its own for usage errors.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Lines of detail only shown with `--verbose`: the failing stage and
    /// the full cause chain.
    fn details(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut source: Option<&(dyn Error + 'static)> = match self {
            Self::Core(err) => {
                if let Some(stage) = err.stage() {
                    lines.push(format!("Stage: {stage}"));
                }
                lines.push(format!("Detail: {:?}", err.root()));
                err.root().source()
            }
            other => other.source(),
        };
        while let Some(err) = source {
            lines.push(format!("Caused by: {err}"));
            source = err.source();
        }
        lines
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.headline().red()));

        if verbose {
            for line in self.details() {
                output.push_str(&format!("\n  {} {}\n", "→".dimmed(), line.dimmed()));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self.headline()));

        if verbose {
            for line in self.details() {
                out.push_str(&format!("  {line}\n"));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::NotFound => {
                tracing::warn!(error = %self, "scaffold rejected")
            }
            _ => tracing::error!(error = %self, "scaffold failed"),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}
