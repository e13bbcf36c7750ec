//! Live progress for a scaffold run.

use std::io::IsTerminal as _;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use kiln_core::application::{ProgressReporter, ScaffoldStage};

const TICK: Duration = Duration::from_millis(80);

/// Spinner on stderr that names the stage being worked on.
///
/// Hidden in quiet and verbose mode (child output would tear it) and when
/// stderr is not a terminal.
#[derive(Clone)]
pub struct SpinnerProgress {
    bar: ProgressBar,
}

impl SpinnerProgress {
    pub fn new(visible: bool) -> Self {
        let bar = if visible {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.enable_steady_tick(TICK);
            bar
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    /// Visible unless the user asked for quiet or verbose output, or
    /// stderr is redirected.
    pub fn for_terminal(quiet: bool, verbose: bool) -> Self {
        Self::new(!quiet && !verbose && std::io::stderr().is_terminal())
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// What the spinner says while `stage` runs.
fn stage_message(stage: ScaffoldStage) -> &'static str {
    match stage {
        ScaffoldStage::Validating => "Checking project name",
        ScaffoldStage::DirectoryReady => "Preparing project directory",
        ScaffoldStage::TemplateCopied => "Copying template",
        ScaffoldStage::Configured => "Configuring project",
        ScaffoldStage::DependenciesInstalled => "Installing dependencies",
        ScaffoldStage::VersionControlInitialized => "Initialising git repository",
        ScaffoldStage::Done => "Finishing",
    }
}

impl ProgressReporter for SpinnerProgress {
    fn stage_started(&self, stage: ScaffoldStage) {
        self.bar.set_message(format!("{}...", stage_message(stage)));
    }

    fn stage_completed(&self, stage: ScaffoldStage) {
        if stage == ScaffoldStage::Done {
            self.bar.finish_and_clear();
        }
    }
}
