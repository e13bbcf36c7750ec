//! Project name validation.
//!
//! Pure and deterministic: the same input always yields the same verdict.

use crate::domain::error::{DomainError, NameViolation};

/// Names that would collide with conventional directory names.
pub const RESERVED_NAMES: [&str; 4] = ["node_modules", "src", "test", "tests"];

/// Upper bound inherited from the package manifest format.
pub const MAX_NAME_LEN: usize = 214;

/// Centralized domain validation.
pub struct DomainValidator;

impl DomainValidator {
    /// Check a raw project name against the naming rules, in order:
    /// character set, reserved names, length.
    pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
        let violation = if !name.chars().all(is_name_char) {
            Some(NameViolation::InvalidCharacters)
        } else if is_reserved(name) {
            Some(NameViolation::Reserved)
        } else if name.is_empty() || name.len() > MAX_NAME_LEN {
            Some(NameViolation::Length {
                actual: name.len(),
                max: MAX_NAME_LEN,
            })
        } else {
            None
        };

        match violation {
            Some(violation) => Err(DomainError::InvalidName {
                name: name.to_string(),
                violation,
            }),
            None => Ok(()),
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}
