//! Template tree discovery.
//!
//! kiln ships a single template tree. Every [`TemplateVariant`] resolves to
//! it; the variant is carried through so a future catalog can split them.
//!
//! # Template resolution order
//!
//! An explicit path (`--template-dir` or `templates.local_path` in config)
//! is used as given, even if it does not exist. Otherwise these are searched
//! in priority order, stopping at the first directory that exists:
//!
//! 1. **`$KILN_TEMPLATE_DIR`**: environment variable override.
//! 2. **`<executable-dir>/template`**: sibling to the installed `kiln` binary.
//! 3. **Source checkout**: the `template/` directory at the workspace root,
//!    baked in at compile time. Convenient for `cargo run` and tests.
//!
//! If none exist, the highest-priority candidate is used anyway so the
//! copier reports `TemplateNotFound` with a path the user recognises.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use kiln_core::{
    application::ports::TemplateCatalog,
    domain::{TemplateDescriptor, TemplateVariant},
    error::KilnResult,
};

/// Environment variable naming a template directory.
pub const TEMPLATE_DIR_ENV: &str = "KILN_TEMPLATE_DIR";

/// Directory name looked for next to the executable.
pub const TEMPLATE_DIR_NAME: &str = "template";

/// Template tree in the source checkout this binary was built from.
const SOURCE_TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../template");

/// Catalog backed by one template tree on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundledTemplates {
    root: PathBuf,
}

impl BundledTemplates {
    /// Use `root` for every variant, no discovery.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Probe the candidate locations described in the module docs.
    #[instrument]
    pub fn discover(explicit: Option<PathBuf>) -> Self {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "using explicit template path");
            return Self::at(path);
        }

        let env_dir = std::env::var_os(TEMPLATE_DIR_ENV).map(PathBuf::from);
        let candidates = candidate_paths(env_dir);

        for candidate in &candidates {
            debug!(path = %candidate.display(), "checking candidate template path");
            if candidate.is_dir() {
                info!(path = %candidate.display(), "template root found");
                return Self::at(candidate.clone());
            }
        }

        warn!(
            "no template directory found; checked ${TEMPLATE_DIR_ENV}, \
             <exe>/{TEMPLATE_DIR_NAME}, and the source checkout"
        );
        let fallback = candidates
            .into_iter()
            .next()
            .unwrap_or_else(|| PathBuf::from(TEMPLATE_DIR_NAME));
        Self::at(fallback)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateCatalog for BundledTemplates {
    fn describe(&self, variant: TemplateVariant) -> KilnResult<TemplateDescriptor> {
        Ok(TemplateDescriptor::new(variant, self.root.clone()))
    }
}

/// Build the ordered list of candidate paths to try.
fn candidate_paths(env_dir: Option<PathBuf>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(3);

    if let Some(p) = env_dir.filter(|p| !p.as_os_str().is_empty()) {
        debug!(path = %p.display(), "candidate from ${TEMPLATE_DIR_ENV}");
        paths.push(p);
    }

    if let Some(p) = exe_sibling_template() {
        paths.push(p);
    }

    paths.push(PathBuf::from(SOURCE_TEMPLATE_DIR));
    paths
}

/// `<directory of current executable>/template`, or `None` if the
/// executable path cannot be determined (some platforms / test runners).
fn exe_sibling_template() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join(TEMPLATE_DIR_NAME)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn env_path_comes_first() {
        let paths = candidate_paths(Some("b".into()));
        assert_eq!(paths[0], PathBuf::from("b"));
        assert_eq!(paths.last(), Some(&PathBuf::from(SOURCE_TEMPLATE_DIR)));
    }

    #[test]
    fn empty_env_value_is_ignored() {
        let paths = candidate_paths(Some(PathBuf::new()));
        assert!(paths.iter().all(|p| !p.as_os_str().is_empty()));
    }

    #[test]
    fn discover_prefers_existing_explicit_dir() {
        let dir = TempDir::new().unwrap();
        let catalog = BundledTemplates::discover(Some(dir.path().to_path_buf()));
        assert_eq!(catalog.root(), dir.path());
    }

    #[test]
    fn missing_explicit_dir_is_kept() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent");
        let catalog = BundledTemplates::discover(Some(missing.clone()));
        assert_eq!(catalog.root(), missing);
    }

    #[test]
    fn every_variant_maps_to_the_same_root() {
        let catalog = BundledTemplates::at("tpl");
        for variant in TemplateVariant::ALL {
            let descriptor = catalog.describe(variant).unwrap();
            assert_eq!(descriptor.source_root(), Path::new("tpl"));
            assert_eq!(descriptor.variant(), variant);
        }
    }

    #[test]
    fn source_checkout_template_exists() {
        assert!(Path::new(SOURCE_TEMPLATE_DIR).join("package.json").is_file());
    }
}
