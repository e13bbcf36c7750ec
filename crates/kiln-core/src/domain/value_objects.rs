//! Domain value objects: ProjectName, TemplateVariant.
//!
//! # Design
//!
//! These are pure value types with equality by value, no identity. A
//! `ProjectName` can only be obtained through validation, so holding one is
//! proof the naming rules were checked.

use crate::domain::{error::DomainError, validation::DomainValidator};
use serde::{Deserialize, Serialize};
use std::fmt;

// ── ProjectName ──────────────────────────────────────────────────────────────

/// A validated project name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate `raw` and wrap it.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        DomainValidator::validate_project_name(&raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── TemplateVariant ──────────────────────────────────────────────────────────

/// Which flavour of the template the user asked for.
///
/// Every variant currently resolves to the same physical template root; the
/// distinction is carried through so a catalog can split them later.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateVariant {
    Basic,
    Secure,
    #[default]
    Full,
}

impl TemplateVariant {
    pub const ALL: [TemplateVariant; 3] = [Self::Basic, Self::Secure, Self::Full];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Secure => "secure",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for TemplateVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
