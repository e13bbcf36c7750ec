//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `kiln-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::application::services::{ScaffoldStage, StepWarning};
use crate::domain::{CopyOutcome, ExcludeRules, TemplateDescriptor, TemplateVariant, WalkListing};
use crate::error::KilnResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `kiln_adapters::filesystem::LocalFilesystem` (production)
/// - `kiln_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Implementations classify OS failures into `PermissionDenied`,
/// `OutOfDiskSpace` and `FilesystemError` application errors.
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> KilnResult<()>;

    /// `true` if the directory has no entries at all (hidden ones included).
    fn is_dir_empty(&self, path: &Path) -> KilnResult<bool>;

    fn read_to_string(&self, path: &Path) -> KilnResult<String>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> KilnResult<()>;

    /// Copy `from` to `to` unless `to` already exists.
    ///
    /// The existence check and the create must be one operation so a
    /// concurrent writer can never be clobbered.
    fn copy_file_if_absent(&self, from: &Path, to: &Path) -> KilnResult<CopyOutcome>;

    /// Recursively list `root`, pruning anything `rules` exclude.
    ///
    /// Paths in the listing are relative to `root`, parents before children,
    /// siblings in name order.
    fn walk(&self, root: &Path, rules: &ExcludeRules) -> KilnResult<WalkListing>;
}

/// One external command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// Inherit the terminal instead of capturing output.
    pub verbose: bool,
}

impl CommandInvocation {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            verbose: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Port for running external tools.
///
/// Implemented by:
/// - `kiln_adapters::process::SystemProcessRunner` (production)
/// - `mockall` fakes in tests
///
/// Results are pass/fail only; output is never parsed.
pub trait ProcessRunner: Send + Sync {
    /// Is `program` resolvable on the PATH?
    fn command_exists(&self, program: &str) -> bool;

    /// Run to completion. Non-zero exit is `NonZeroExit`, failure to start
    /// is `ProcessSpawn`.
    fn run(&self, invocation: &CommandInvocation) -> KilnResult<()>;
}

/// Port mapping a template variant to its source tree.
///
/// Implemented by:
/// - `kiln_adapters::templates::BundledTemplates`
pub trait TemplateCatalog: Send + Sync {
    fn describe(&self, variant: TemplateVariant) -> KilnResult<TemplateDescriptor>;
}

/// Port for surfacing progress to whoever is driving a scaffold run.
///
/// All methods default to doing nothing.
pub trait ProgressReporter: Send + Sync {
    fn stage_started(&self, _stage: ScaffoldStage) {}

    fn stage_completed(&self, _stage: ScaffoldStage) {}

    fn warning(&self, _warning: &StepWarning) {}
}

/// Reporter that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {}
