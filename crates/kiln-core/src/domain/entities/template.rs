//! Where a template variant lives on disk.

use std::path::{Path, PathBuf};

use crate::domain::TemplateVariant;

/// File at the project root that holds the package manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// Top-level documentation file that receives placeholder substitution.
pub const README_FILE: &str = "README.md";

/// A requested variant mapped to a physical template root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    variant: TemplateVariant,
    source_root: PathBuf,
}

impl TemplateDescriptor {
    pub fn new(variant: TemplateVariant, source_root: impl Into<PathBuf>) -> Self {
        Self {
            variant,
            source_root: source_root.into(),
        }
    }

    pub fn variant(&self) -> TemplateVariant {
        self.variant
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }
}
