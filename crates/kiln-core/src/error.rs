//! Unified error handling for kiln core.
//!
//! This module provides the root error type that wraps domain and application
//! errors, with the stage a failure happened at and user-actionable
//! suggestions.

use thiserror::Error;

use crate::application::{ApplicationError, ScaffoldStage};
use crate::domain::DomainError;

/// Root error type for kiln core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KilnError {
    /// Errors from the domain layer (business rule violations).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration and I/O failures).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// A failure attributed to one stage of a scaffold run.
    #[error("{stage} failed")]
    StepFailed {
        stage: ScaffoldStage,
        #[source]
        source: Box<KilnError>,
    },

    /// Unexpected internal errors (bugs).
    #[error("internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl KilnError {
    /// Attribute this error to `stage`. Already-attributed errors keep
    /// their original stage.
    pub fn at_stage(self, stage: ScaffoldStage) -> Self {
        match self {
            Self::StepFailed { .. } => self,
            other => Self::StepFailed {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Stage the failure happened at, if known.
    pub fn stage(&self) -> Option<ScaffoldStage> {
        match self {
            Self::StepFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The error with any stage attribution peeled off.
    pub fn root(&self) -> &KilnError {
        match self {
            Self::StepFailed { source, .. } => source.root(),
            other => other,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::StepFailed { source, .. } => source.suggestions(),
            Self::Internal { .. } => vec!["This appears to be a bug in kiln".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::StepFailed { source, .. } => source.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Filesystem,
    /// An external tool (package manager, git) misbehaved.
    External,
    Internal,
}

/// Convenient result type alias.
pub type KilnResult<T> = Result<T, KilnError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> KilnResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> KilnResult<T> {
        self.map_err(|e| KilnError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::NameViolation;

    fn not_empty() -> KilnError {
        ApplicationError::DirectoryNotEmpty {
            path: PathBuf::from("my-api"),
        }
        .into()
    }

    #[test]
    fn at_stage_wraps_once() {
        let err = not_empty()
            .at_stage(ScaffoldStage::DirectoryReady)
            .at_stage(ScaffoldStage::TemplateCopied);
        assert_eq!(err.stage(), Some(ScaffoldStage::DirectoryReady));
        assert_eq!(err.root(), &not_empty());
    }

    #[test]
    fn staged_error_keeps_category_and_suggestions() {
        let err = not_empty().at_stage(ScaffoldStage::DirectoryReady);
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.suggestions(), not_empty().suggestions());
    }

    #[test]
    fn source_chain_reaches_the_cause() {
        use std::error::Error as _;
        let err = not_empty().at_stage(ScaffoldStage::DirectoryReady);
        let cause = err.source().map(|s| s.to_string()).unwrap();
        assert!(cause.contains("not empty"));
    }

    #[test]
    fn domain_errors_are_transparent() {
        let err: KilnError = DomainError::InvalidName {
            name: "src".into(),
            violation: NameViolation::Reserved,
        }
        .into();
        assert_eq!(err.to_string(), "invalid project name 'src': this name is reserved");
    }

    #[test]
    fn context_becomes_internal() {
        let res: Result<(), std::fmt::Error> = Err(std::fmt::Error);
        let err = res.context("formatting").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Internal);
    }
}
