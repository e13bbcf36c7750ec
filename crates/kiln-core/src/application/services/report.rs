//! What a scaffold run reports back to its caller.

use std::fmt;
use std::path::PathBuf;

use crate::application::services::DirectoryState;
use crate::domain::{CopyPlan, CopyReport, ProjectName, TemplateDescriptor};

/// States of a scaffold run, in the order they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScaffoldStage {
    Validating,
    DirectoryReady,
    TemplateCopied,
    Configured,
    DependenciesInstalled,
    VersionControlInitialized,
    Done,
}

impl ScaffoldStage {
    /// Human label used in progress output and error messages.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Validating => "name validation",
            Self::DirectoryReady => "directory setup",
            Self::TemplateCopied => "template copy",
            Self::Configured => "project configuration",
            Self::DependenciesInstalled => "dependency install",
            Self::VersionControlInitialized => "git initialisation",
            Self::Done => "scaffold",
        }
    }
}

impl fmt::Display for ScaffoldStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A non-fatal problem from an optional step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepWarning {
    pub stage: ScaffoldStage,
    pub message: String,
    /// Command the user can run to finish the step by hand.
    pub remedy: String,
}

impl fmt::Display for StepWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.stage, self.message)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub project_name: ProjectName,
    pub project_path: PathBuf,
    /// The target was an existing empty directory.
    pub reused_directory: bool,
    /// Stages completed, in order. Optional stages appear only if they ran
    /// and succeeded.
    pub stages: Vec<ScaffoldStage>,
    pub copy: CopyReport,
    pub warnings: Vec<StepWarning>,
}

impl ScaffoldReport {
    pub fn reached(&self, stage: ScaffoldStage) -> bool {
        self.stages.contains(&stage)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// An optional step a run would attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub stage: ScaffoldStage,
    /// Commands in the order they would run, rendered for display.
    pub commands: Vec<String>,
    /// The tool was found on the PATH.
    pub available: bool,
}

/// Everything a run would do, computed without writing. Used by dry runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldPlan {
    pub project_name: ProjectName,
    pub project_path: PathBuf,
    pub directory: DirectoryState,
    pub template: TemplateDescriptor,
    pub copy: CopyPlan,
    pub steps: Vec<PlannedStep>,
}
