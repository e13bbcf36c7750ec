// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use std::fmt;

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so reports can carry them)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid project name '{name}': {violation}")]
    InvalidName {
        name: String,
        violation: NameViolation,
    },

    #[error("absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("placeholder key '{key}' is not a valid token name")]
    InvalidPlaceholderKey { key: String },

    #[error("required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

/// The specific rule a project name broke.
///
/// Rules are checked in declaration order; the first failure wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameViolation {
    /// Contains something other than ASCII letters, digits, `-` or `_`.
    InvalidCharacters,
    /// Collides with a conventional directory name.
    Reserved,
    /// Empty, or longer than the manifest format allows.
    Length { actual: usize, max: usize },
}

impl fmt::Display for NameViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacters => {
                f.write_str("only letters, digits, hyphens and underscores are allowed")
            }
            Self::Reserved => f.write_str("this name is reserved"),
            Self::Length { actual: 0, .. } => f.write_str("name cannot be empty"),
            Self::Length { actual, max } => {
                write!(f, "name is {actual} characters long (maximum {max})")
            }
        }
    }
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { violation, .. } => match violation {
                NameViolation::InvalidCharacters => vec![
                    "Use alphanumeric characters, hyphens, and underscores".into(),
                    "Examples: my-api, my_service, backend2".into(),
                ],
                NameViolation::Reserved => vec![
                    "node_modules, src, test and tests are reserved directory names".into(),
                    "Choose a more descriptive name, e.g. my-api".into(),
                ],
                NameViolation::Length { max, .. } => vec![
                    format!("Project names must be between 1 and {max} characters"),
                ],
            },
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. } => ErrorCategory::Validation,
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
