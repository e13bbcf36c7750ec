//! External process adapter using std::process.

use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tracing::{debug, instrument};

use kiln_core::{
    application::{
        ApplicationError,
        ports::{CommandInvocation, ProcessRunner},
    },
    error::KilnResult,
};

/// Runs commands on the host, resolving programs through the PATH.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn command_exists(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    #[instrument(skip_all, fields(command = %invocation, cwd = %invocation.cwd.display()))]
    fn run(&self, invocation: &CommandInvocation) -> KilnResult<()> {
        // Resolve up front so `npm` finds `npm.cmd` on Windows.
        let program = which::which(&invocation.program)
            .unwrap_or_else(|_| PathBuf::from(&invocation.program));

        let mut command = Command::new(program);
        command
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null());

        let spawn_error = |e: std::io::Error| ApplicationError::ProcessSpawn {
            program: invocation.program.clone(),
            reason: e.to_string(),
        };

        let status = if invocation.verbose {
            command
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(spawn_error)?
        } else {
            let output = command.output().map_err(spawn_error)?;
            log_output(&output);
            output.status
        };

        if status.success() {
            debug!("Command succeeded");
            Ok(())
        } else {
            Err(ApplicationError::NonZeroExit {
                program: invocation.program.clone(),
                code: status.code(),
            }
            .into())
        }
    }
}

/// Captured output is only ever logged, never interpreted.
fn log_output(output: &Output) {
    for line in String::from_utf8_lossy(&output.stdout).lines() {
        debug!(target: "kiln::process::stdout", "{line}");
    }
    for line in String::from_utf8_lossy(&output.stderr).lines() {
        debug!(target: "kiln::process::stderr", "{line}");
    }
}
