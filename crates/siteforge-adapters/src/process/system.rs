//! Process runner backed by `std::process::Command`.

use std::path::Path;
use std::process::{Command, Stdio};

use siteforge_core::{
    application::{ApplicationError, ports::ProcessRunner},
    domain::Invocation,
    error::SiteforgeResult,
};
use tracing::{debug, instrument};

/// Runs tools as child processes sharing the parent's terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    /// A tool counts as available when `<program> --version` can be spawned.
    fn is_available(&self, program: &str) -> bool {
        Command::new(program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    #[instrument(skip(self), fields(command = %invocation))]
    fn run(&self, invocation: &Invocation, cwd: &Path) -> SiteforgeResult<()> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(cwd)
            .status()
            .map_err(|e| {
                debug!(error = %e, "spawn failed");
                ApplicationError::ToolUnavailable {
                    program: invocation.program.clone(),
                }
            })?;

        if status.success() {
            debug!("tool finished");
            Ok(())
        } else {
            Err(ApplicationError::ToolFailed {
                command: invocation.to_string(),
                status: status.code(),
            }
            .into())
        }
    }
}
