//! `kiln <NAME>`: create a project.
//!
//! Responsibility: translate CLI arguments and config into a
//! `ProjectRequest`, call the core scaffold service, and display results.
//! No business logic lives here.

use tracing::{debug, info, instrument};

use kiln_adapters::{BundledTemplates, LocalFilesystem, SystemProcessRunner};
use kiln_core::{
    application::{DirectoryState, ScaffoldPlan, ScaffoldReport, ScaffoldService, ScaffoldStage},
    domain::{ProjectRequest, ScaffoldOptions},
    error::KilnError,
};

use crate::{
    cli::{GlobalArgs, ScaffoldArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
    progress::SpinnerProgress,
};

/// Execute a scaffold run.
///
/// 1. Merge flags over config into `ScaffoldOptions`
/// 2. Build the request against the current directory
/// 3. Dry run: print the plan and stop
/// 4. Otherwise run the orchestrator behind a spinner
/// 5. Print the summary and next steps
#[instrument(skip_all, fields(project = %name))]
pub fn execute(
    name: String,
    args: ScaffoldArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let options = resolve_options(&args, &global, &config);
    let cwd = std::env::current_dir()?;

    debug!(
        install = options.install,
        git = options.init_git,
        variant = %options.variant,
        package_manager = %options.package_manager,
        cwd = %cwd.display(),
        "options resolved"
    );

    let request = ProjectRequest::builder(name)
        .target_directory(cwd)
        .options(options)
        .build()
        .map_err(KilnError::from)?;

    let template_dir = args.template_dir.or(config.templates.local_path);
    let service = ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(SystemProcessRunner::new()),
        Box::new(BundledTemplates::discover(template_dir)),
    );

    if args.dry_run {
        let plan = service.plan(&request)?;
        print_plan(&plan, &output)?;
        return Ok(());
    }

    let spinner = SpinnerProgress::for_terminal(output.is_quiet(), global.verbose);
    let service = service.with_progress(Box::new(spinner.clone()));
    let result = service.scaffold(&request);
    spinner.finish();
    let report = result?;

    info!(path = %report.project_path.display(), "project created");
    print_report(&report, &request.options().package_manager, &output)?;
    Ok(())
}

/// Flags win over config; config wins over built-in defaults.
pub(crate) fn resolve_options(
    args: &ScaffoldArgs,
    global: &GlobalArgs,
    config: &AppConfig,
) -> ScaffoldOptions {
    ScaffoldOptions {
        install: config.defaults.install && !args.no_install,
        init_git: config.defaults.git || args.git,
        variant: args
            .template
            .map(Into::into)
            .unwrap_or(config.defaults.template),
        verbose: global.verbose,
        package_manager: args
            .package_manager
            .map(|pm| pm.as_str().to_string())
            .unwrap_or_else(|| config.commands.package_manager.clone()),
    }
}

/// Commands the user should run next, in order.
pub(crate) fn next_steps(report: &ScaffoldReport, package_manager: &str) -> Vec<String> {
    let mut steps = vec![format!("cd {}", report.project_name)];
    if !report.reached(ScaffoldStage::DependenciesInstalled) {
        steps.push(format!("{package_manager} install"));
    }
    steps.push("cp .env.example .env".to_string());
    steps.push(format!("{package_manager} run dev"));
    steps
}

fn print_report(
    report: &ScaffoldReport,
    package_manager: &str,
    output: &OutputManager,
) -> std::io::Result<()> {
    let location = if report.reused_directory {
        "existing empty directory"
    } else {
        "new directory"
    };
    output.success(&format!(
        "Created '{}' at {} ({location})",
        report.project_name,
        report.project_path.display(),
    ))?;

    let mut copied = format!("{} files copied", report.copy.copied);
    if report.copy.excluded > 0 {
        copied.push_str(&format!(", {} excluded", report.copy.excluded));
    }
    if !report.copy.skipped.is_empty() {
        copied.push_str(&format!(", {} already present", report.copy.skipped.len()));
    }
    output.info(&copied)?;

    if report.reached(ScaffoldStage::DependenciesInstalled) {
        output.info(&format!("Dependencies installed with {package_manager}"))?;
    }
    if report.reached(ScaffoldStage::VersionControlInitialized) {
        output.info("Git repository initialised with an initial commit")?;
    }

    for warning in &report.warnings {
        output.warning(&warning.to_string())?;
        output.warning(&format!("  to finish by hand: {}", warning.remedy))?;
    }

    output.print("")?;
    output.header("Next steps:")?;
    for step in next_steps(report, package_manager) {
        output.command(&step)?;
    }
    Ok(())
}

fn print_plan(plan: &ScaffoldPlan, output: &OutputManager) -> std::io::Result<()> {
    output.header("Dry run: nothing will be written")?;
    output.print("")?;
    output.print(&format!("  Project:   {}", plan.project_name))?;

    let state = match plan.directory {
        DirectoryState::Missing => "will be created",
        DirectoryState::Empty => "exists and is empty, will be reused",
    };
    output.print(&format!(
        "  Location:  {} ({state})",
        plan.project_path.display()
    ))?;
    output.print(&format!(
        "  Template:  {} ({})",
        plan.template.variant(),
        plan.template.source_root().display()
    ))?;
    output.print(&format!(
        "  Files:     {} to copy, {} excluded",
        plan.copy.file_count(),
        plan.copy.excluded
    ))?;
    for entry in plan.copy.files() {
        output.print(&format!("    {}", entry.relative))?;
    }

    for step in &plan.steps {
        let note = if step.available {
            ""
        } else {
            "  (tool not found, will be skipped)"
        };
        output.print(&format!("  {}:{note}", capitalise(step.stage.label())))?;
        for cmd in &step.commands {
            output.command(&format!("  {cmd}"))?;
        }
    }
    Ok(())
}

fn capitalise(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use kiln_core::application::StepWarning;
    use kiln_core::domain::{CopyReport, ProjectName, TemplateVariant};

    use crate::cli::{PackageManager, TemplateArg};

    fn report(stages: Vec<ScaffoldStage>) -> ScaffoldReport {
        ScaffoldReport {
            project_name: ProjectName::parse("my-api").unwrap(),
            project_path: PathBuf::from("/work/my-api"),
            reused_directory: false,
            stages,
            copy: CopyReport::default(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn defaults_come_from_config() {
        let opts = resolve_options(
            &ScaffoldArgs::default(),
            &GlobalArgs::default(),
            &AppConfig::default(),
        );
        assert_eq!(opts, ScaffoldOptions::default());
    }

    #[test]
    fn flags_override_config() {
        let mut config = AppConfig::default();
        config.defaults.template = TemplateVariant::Basic;
        config.commands.package_manager = "yarn".into();

        let args = ScaffoldArgs {
            no_install: true,
            git: true,
            template: Some(TemplateArg::Secure),
            package_manager: Some(PackageManager::Pnpm),
            ..ScaffoldArgs::default()
        };
        let global = GlobalArgs {
            verbose: true,
            ..GlobalArgs::default()
        };

        let opts = resolve_options(&args, &global, &config);
        assert!(!opts.install);
        assert!(opts.init_git);
        assert!(opts.verbose);
        assert_eq!(opts.variant, TemplateVariant::Secure);
        assert_eq!(opts.package_manager, "pnpm");
    }

    #[test]
    fn config_can_turn_off_install_and_on_git() {
        let mut config = AppConfig::default();
        config.defaults.install = false;
        config.defaults.git = true;
        let opts = resolve_options(&ScaffoldArgs::default(), &GlobalArgs::default(), &config);
        assert!(!opts.install);
        assert!(opts.init_git);
    }

    #[test]
    fn next_steps_include_install_when_skipped() {
        let mut r = report(vec![ScaffoldStage::Configured, ScaffoldStage::Done]);
        r.warnings.push(StepWarning {
            stage: ScaffoldStage::DependenciesInstalled,
            message: "'npm' was not found on PATH".into(),
            remedy: "cd my-api && npm install".into(),
        });
        assert_eq!(
            next_steps(&r, "npm"),
            vec!["cd my-api", "npm install", "cp .env.example .env", "npm run dev"]
        );
    }

    #[test]
    fn next_steps_skip_install_when_done() {
        let r = report(vec![
            ScaffoldStage::Configured,
            ScaffoldStage::DependenciesInstalled,
            ScaffoldStage::Done,
        ]);
        assert_eq!(
            next_steps(&r, "pnpm"),
            vec!["cd my-api", "cp .env.example .env", "pnpm run dev"]
        );
    }

    #[test]
    fn capitalise_first_letter() {
        assert_eq!(capitalise("dependency install"), "Dependency install");
        assert_eq!(capitalise(""), "");
    }
}
