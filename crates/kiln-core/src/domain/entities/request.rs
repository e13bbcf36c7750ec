//! The single input to a scaffold run.

use std::path::{Path, PathBuf};

use crate::domain::{DomainError, ProjectName, TemplateVariant};

/// Package manager used for the install step when none is configured.
pub const DEFAULT_PACKAGE_MANAGER: &str = "npm";

/// Knobs that change what the orchestrator does after copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOptions {
    /// Run `<package_manager> install` in the new project.
    pub install: bool,
    /// Run `git init` + initial commit in the new project.
    pub init_git: bool,
    pub variant: TemplateVariant,
    /// Stream child output and treat optional-step failures as fatal.
    pub verbose: bool,
    pub package_manager: String,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            install: true,
            init_git: false,
            variant: TemplateVariant::default(),
            verbose: false,
            package_manager: DEFAULT_PACKAGE_MANAGER.to_string(),
        }
    }
}

/// A request to create one project.
///
/// Fields are frozen once built. The name is checked by [`validate`](Self::validate),
/// which the orchestrator runs as its first stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequest {
    name: String,
    target_directory: PathBuf,
    options: ScaffoldOptions,
}

impl ProjectRequest {
    pub fn builder(name: impl Into<String>) -> ProjectRequestBuilder {
        ProjectRequestBuilder {
            name: name.into(),
            target_directory: None,
            options: ScaffoldOptions::default(),
        }
    }

    /// The name exactly as supplied.
    pub fn raw_name(&self) -> &str {
        &self.name
    }

    /// Apply the naming rules.
    pub fn validate(&self) -> Result<ProjectName, DomainError> {
        ProjectName::parse(self.name.as_str())
    }

    /// Directory the project folder is created in (usually the CWD).
    pub fn target_directory(&self) -> &Path {
        &self.target_directory
    }

    pub fn options(&self) -> &ScaffoldOptions {
        &self.options
    }

    /// `target_directory/name`.
    pub fn project_path(&self) -> PathBuf {
        self.target_directory.join(&self.name)
    }
}

/// Builder for [`ProjectRequest`].
#[derive(Debug, Clone)]
pub struct ProjectRequestBuilder {
    name: String,
    target_directory: Option<PathBuf>,
    options: ScaffoldOptions,
}

impl ProjectRequestBuilder {
    pub fn target_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.target_directory = Some(dir.into());
        self
    }

    pub fn options(mut self, options: ScaffoldOptions) -> Self {
        self.options = options;
        self
    }

    pub fn install(mut self, install: bool) -> Self {
        self.options.install = install;
        self
    }

    pub fn init_git(mut self, init_git: bool) -> Self {
        self.options.init_git = init_git;
        self
    }

    pub fn variant(mut self, variant: TemplateVariant) -> Self {
        self.options.variant = variant;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.options.verbose = verbose;
        self
    }

    pub fn package_manager(mut self, package_manager: impl Into<String>) -> Self {
        self.options.package_manager = package_manager.into();
        self
    }

    /// Freeze the request.
    pub fn build(self) -> Result<ProjectRequest, DomainError> {
        let target_directory = self
            .target_directory
            .ok_or(DomainError::MissingRequiredField {
                field: "target_directory",
            })?;

        Ok(ProjectRequest {
            name: self.name,
            target_directory,
            options: self.options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_defaults() {
        let opts = ScaffoldOptions::default();
        assert!(opts.install);
        assert!(!opts.init_git);
        assert!(!opts.verbose);
        assert_eq!(opts.variant, TemplateVariant::Full);
        assert_eq!(opts.package_manager, "npm");
    }

    #[test]
    fn validate_applies_naming_rules() {
        let req = ProjectRequest::builder("src")
            .target_directory("work")
            .build()
            .unwrap();
        assert!(matches!(
            req.validate(),
            Err(DomainError::InvalidName { .. })
        ));
        assert_eq!(req.raw_name(), "src");
    }

    #[test]
    fn build_requires_target_directory() {
        let err = ProjectRequest::builder("my-api").build().unwrap_err();
        assert_eq!(
            err,
            DomainError::MissingRequiredField {
                field: "target_directory"
            }
        );
    }

    #[test]
    fn project_path_joins_name() {
        let req = ProjectRequest::builder("my-api")
            .target_directory("work")
            .install(false)
            .init_git(true)
            .variant(TemplateVariant::Basic)
            .build()
            .unwrap();
        assert_eq!(req.project_path(), PathBuf::from("work").join("my-api"));
        assert!(!req.options().install);
        assert!(req.options().init_git);
        assert_eq!(req.options().variant, TemplateVariant::Basic);
    }
}
