//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! rules. Business rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while carrying out a scaffold run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Target exists and already has entries in it.
    #[error("directory '{}' already exists and is not empty", path.display())]
    DirectoryNotEmpty { path: PathBuf },

    /// Target exists but is a file (or something else that is not a directory).
    #[error("'{}' exists and is not a directory", path.display())]
    PathNotDirectory { path: PathBuf },

    /// Template root for the requested variant is missing.
    #[error("template '{variant}' not found at {}", path.display())]
    TemplateNotFound { path: PathBuf, variant: String },

    /// A file or directory could not be copied out of the template.
    #[error("failed to copy {}: {reason}", path.display())]
    CopyFailure { path: PathBuf, reason: String },

    /// The generated manifest or docs could not be rewritten.
    #[error("failed to configure {}: {reason}", path.display())]
    ConfigurationFailure { path: PathBuf, reason: String },

    /// Dependency install or version-control init failed.
    #[error("{step} failed: {reason}")]
    OptionalStepFailure {
        step: String,
        reason: String,
        /// Command the user can run by hand.
        remedy: String,
    },

    #[error("permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("no space left on device while writing {}", path.display())]
    OutOfDiskSpace { path: PathBuf },

    /// Any other filesystem failure.
    #[error("filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// The child process could not be started at all.
    #[error("failed to run '{program}': {reason}")]
    ProcessSpawn { program: String, reason: String },

    /// The child process ran and reported failure.
    #[error("'{program}' exited with {}", exit_status_text(.code))]
    NonZeroExit { program: String, code: Option<i32> },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DirectoryNotEmpty { path } => vec![
                format!("Remove or empty {} first", path.display()),
                "Or choose a different project name".into(),
            ],
            Self::PathNotDirectory { path } => vec![
                format!("A file named {} is in the way", path.display()),
                "Choose a different project name".into(),
            ],
            Self::TemplateNotFound { path, .. } => vec![
                format!("Expected a template tree at {}", path.display()),
                "Point --template-dir (or KILN_TEMPLATE_DIR) at a template directory".into(),
            ],
            Self::CopyFailure { .. } => vec![
                "Re-run the same command: files already copied are kept and skipped".into(),
            ],
            Self::ConfigurationFailure { path, .. } => vec![
                format!("Check that {} exists and is valid JSON", path.display()),
            ],
            Self::OptionalStepFailure { remedy, .. } => {
                vec![format!("Run it manually: {remedy}")]
            }
            Self::PermissionDenied { path } => vec![
                format!("You do not have write access to {}", path.display()),
                "Try a different location, or re-run with elevated privileges".into(),
            ],
            Self::OutOfDiskSpace { .. } => vec![
                "Free up disk space and re-run; copied files will be skipped".into(),
            ],
            Self::ProcessSpawn { program, .. } => vec![
                format!("Make sure '{program}' is installed and on your PATH"),
            ],
            Self::NonZeroExit { .. } => {
                vec!["Re-run with --verbose to see the command output".into()]
            }
            Self::FilesystemError { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DirectoryNotEmpty { .. } | Self::PathNotDirectory { .. } => {
                ErrorCategory::Validation
            }
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigurationFailure { .. } => ErrorCategory::Configuration,
            Self::OptionalStepFailure { .. }
            | Self::ProcessSpawn { .. }
            | Self::NonZeroExit { .. } => ErrorCategory::External,
            Self::CopyFailure { .. }
            | Self::PermissionDenied { .. }
            | Self::OutOfDiskSpace { .. }
            | Self::FilesystemError { .. } => ErrorCategory::Filesystem,
        }
    }
}

fn exit_status_text(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "no status (terminated by signal)".to_string(),
    }
}
