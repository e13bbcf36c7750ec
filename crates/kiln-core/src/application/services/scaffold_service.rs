//! Scaffold Service - main application orchestrator.
//!
//! Runs the stages of [`ScaffoldStage`] strictly in order:
//! validate the name, prepare the directory, copy the template, configure
//! the manifest and README, then the optional install and git steps.
//!
//! The first fatal failure stops the run and is returned tagged with its
//! stage. Nothing is rolled back: the copier never overwrites, so re-running
//! the same command against the same directory picks up where it stopped.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandInvocation, Filesystem, NoopProgress, ProcessRunner, ProgressReporter, TemplateCatalog},
        services::{
            ConfigUpdater, DirectoryResolver, PlannedStep, ScaffoldPlan, ScaffoldReport,
            ScaffoldStage, StepWarning, TemplateCopier,
        },
    },
    domain::{ProjectName, ProjectRequest, ScaffoldOptions},
    error::{KilnError, KilnResult},
};

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn ProcessRunner>,
    catalog: Box<dyn TemplateCatalog>,
    progress: Box<dyn ProgressReporter>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kiln_core::application::ScaffoldService;
    /// # fn adapters() -> (
    /// #     Box<dyn kiln_core::application::ports::Filesystem>,
    /// #     Box<dyn kiln_core::application::ports::ProcessRunner>,
    /// #     Box<dyn kiln_core::application::ports::TemplateCatalog>,
    /// # ) { unimplemented!() }
    /// let (filesystem, runner, catalog) = adapters();
    /// let service = ScaffoldService::new(filesystem, runner, catalog);
    /// ```
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        runner: Box<dyn ProcessRunner>,
        catalog: Box<dyn TemplateCatalog>,
    ) -> Self {
        Self {
            filesystem,
            runner,
            catalog,
            progress: Box::new(NoopProgress),
        }
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Create a project.
    #[instrument(
        skip_all,
        fields(
            project = %request.raw_name(),
            target = %request.target_directory().display(),
            variant = %request.options().variant,
        )
    )]
    pub fn scaffold(&self, request: &ProjectRequest) -> KilnResult<ScaffoldReport> {
        let options = request.options();
        let mut stages = Vec::new();
        let mut warnings = Vec::new();

        let name = self.stage(ScaffoldStage::Validating, || {
            request.validate().map_err(KilnError::from)
        })?;
        stages.push(ScaffoldStage::Validating);

        let directory = self.stage(ScaffoldStage::DirectoryReady, || {
            DirectoryResolver::new(self.fs()).resolve(&name, request.target_directory())
        })?;
        stages.push(ScaffoldStage::DirectoryReady);

        let copy = self.stage(ScaffoldStage::TemplateCopied, || {
            let template = self.catalog.describe(options.variant)?;
            TemplateCopier::new(self.fs()).copy(&template, &directory.path)
        })?;
        stages.push(ScaffoldStage::TemplateCopied);
        if !copy.skipped.is_empty() {
            info!(skipped = copy.skipped.len(), "Existing files were left untouched");
        }

        self.stage(ScaffoldStage::Configured, || {
            ConfigUpdater::new(self.fs()).configure(&directory.path, &name)
        })?;
        stages.push(ScaffoldStage::Configured);

        for step in OptionalStep::enabled(options) {
            if self.run_optional(step, options, &name, &directory.path, &mut warnings)? {
                stages.push(step.stage());
            }
        }

        stages.push(ScaffoldStage::Done);
        self.progress.stage_completed(ScaffoldStage::Done);
        info!(
            path = %directory.path.display(),
            copied = copy.copied,
            warnings = warnings.len(),
            "Scaffold completed"
        );

        Ok(ScaffoldReport {
            project_name: name,
            project_path: directory.path,
            reused_directory: directory.reused,
            stages,
            copy,
            warnings,
        })
    }

    /// Work out what [`scaffold`](Self::scaffold) would do, writing nothing.
    ///
    /// Fails for the same reasons a real run would fail before its first
    /// write: a bad name, an unusable target, a missing template.
    #[instrument(skip_all, fields(project = %request.raw_name()))]
    pub fn plan(&self, request: &ProjectRequest) -> KilnResult<ScaffoldPlan> {
        let options = request.options();

        let name = request
            .validate()
            .map_err(|e| KilnError::from(e).at_stage(ScaffoldStage::Validating))?;

        let project_path = request.project_path();
        let directory = DirectoryResolver::new(self.fs())
            .inspect(&project_path)
            .map_err(|e| e.at_stage(ScaffoldStage::DirectoryReady))?;

        let (template, copy) = self
            .catalog
            .describe(options.variant)
            .and_then(|template| {
                let plan = TemplateCopier::new(self.fs()).plan(&template, &project_path)?;
                Ok((template, plan))
            })
            .map_err(|e| e.at_stage(ScaffoldStage::TemplateCopied))?;

        let steps = OptionalStep::enabled(options)
            .map(|step| PlannedStep {
                stage: step.stage(),
                commands: step
                    .invocations(options, &project_path)
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                available: self.runner.command_exists(step.program(options)),
            })
            .collect();

        Ok(ScaffoldPlan {
            project_name: name,
            project_path,
            directory,
            template,
            copy,
            steps,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn fs(&self) -> &dyn Filesystem {
        self.filesystem.as_ref()
    }

    /// Run one mandatory stage, reporting progress and tagging failures.
    fn stage<T>(
        &self,
        stage: ScaffoldStage,
        body: impl FnOnce() -> KilnResult<T>,
    ) -> KilnResult<T> {
        self.progress.stage_started(stage);
        match body() {
            Ok(value) => {
                self.progress.stage_completed(stage);
                Ok(value)
            }
            Err(e) => {
                debug!(%stage, error = %e, "Stage failed");
                Err(e.at_stage(stage))
            }
        }
    }

    /// Returns `Ok(true)` if the step ran and succeeded, `Ok(false)` if it
    /// was skipped or failed non-fatally.
    fn run_optional(
        &self,
        step: OptionalStep,
        options: &ScaffoldOptions,
        name: &ProjectName,
        project_path: &Path,
        warnings: &mut Vec<StepWarning>,
    ) -> KilnResult<bool> {
        let stage = step.stage();
        let program = step.program(options);
        let remedy = step.remedy(options, name);
        self.progress.stage_started(stage);

        // A missing tool is never fatal, even in strict mode.
        if !self.runner.command_exists(program) {
            self.warn(
                warnings,
                StepWarning {
                    stage,
                    message: format!("'{program}' was not found on PATH, step skipped"),
                    remedy,
                },
            );
            return Ok(false);
        }

        for invocation in step.invocations(options, project_path) {
            debug!(command = %invocation, "Running");
            if let Err(e) = self.runner.run(&invocation) {
                let failure = ApplicationError::OptionalStepFailure {
                    step: stage.label().to_string(),
                    reason: e.root().to_string(),
                    remedy: remedy.clone(),
                };
                if options.verbose {
                    return Err(KilnError::from(failure).at_stage(stage));
                }
                self.warn(
                    warnings,
                    StepWarning {
                        stage,
                        message: failure.to_string(),
                        remedy,
                    },
                );
                return Ok(false);
            }
        }

        self.progress.stage_completed(stage);
        Ok(true)
    }

    fn warn(&self, warnings: &mut Vec<StepWarning>, warning: StepWarning) {
        warn!(stage = %warning.stage, remedy = %warning.remedy, "{}", warning.message);
        self.progress.warning(&warning);
        warnings.push(warning);
    }
}

/// Post-configuration steps whose failure is survivable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionalStep {
    Install,
    VersionControl,
}

impl OptionalStep {
    const GIT: &'static str = "git";
    const INITIAL_COMMIT_MESSAGE: &'static str = "Initial commit";

    /// Steps switched on by `options`, in run order.
    fn enabled(options: &ScaffoldOptions) -> impl Iterator<Item = OptionalStep> {
        [
            options.install.then_some(Self::Install),
            options.init_git.then_some(Self::VersionControl),
        ]
        .into_iter()
        .flatten()
    }

    fn stage(self) -> ScaffoldStage {
        match self {
            Self::Install => ScaffoldStage::DependenciesInstalled,
            Self::VersionControl => ScaffoldStage::VersionControlInitialized,
        }
    }

    fn program(self, options: &ScaffoldOptions) -> &str {
        match self {
            Self::Install => &options.package_manager,
            Self::VersionControl => Self::GIT,
        }
    }

    fn invocations(self, options: &ScaffoldOptions, project_path: &Path) -> Vec<CommandInvocation> {
        let cmd = |program: &str| {
            CommandInvocation::new(program, project_path).verbose(options.verbose)
        };
        match self {
            Self::Install => vec![cmd(&options.package_manager).arg("install")],
            Self::VersionControl => vec![
                cmd(Self::GIT).arg("init"),
                cmd(Self::GIT).arg("add").arg("-A"),
                cmd(Self::GIT)
                    .arg("commit")
                    .arg("-m")
                    .arg(Self::INITIAL_COMMIT_MESSAGE),
            ],
        }
    }

    /// What the user can type to finish the step themselves.
    fn remedy(self, options: &ScaffoldOptions, name: &ProjectName) -> String {
        let commands = self
            .invocations(options, Path::new(name.as_str()))
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" && ");
        format!("cd {name} && {commands}")
    }
}
