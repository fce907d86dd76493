//! Process runner that records invocations instead of spawning them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use siteforge_core::{
    application::{ApplicationError, ports::ProcessRunner},
    domain::Invocation,
    error::SiteforgeResult,
};

/// Records every invocation with its working directory.
///
/// All programs are available unless marked otherwise. A failing program
/// makes `run` return `ToolFailed` with exit code 1 after recording the call.
#[derive(Debug, Clone, Default)]
pub struct RecordingProcessRunner {
    inner: Arc<Mutex<RecordingState>>,
}

#[derive(Debug, Default)]
struct RecordingState {
    calls: Vec<(Invocation, PathBuf)>,
    unavailable: HashSet<String>,
    failing: HashSet<String>,
}

impl RecordingProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unavailable(self, program: &str) -> Self {
        if let Ok(mut state) = self.inner.lock() {
            state.unavailable.insert(program.to_string());
        }
        self
    }

    pub fn with_failing(self, program: &str) -> Self {
        if let Ok(mut state) = self.inner.lock() {
            state.failing.insert(program.to_string());
        }
        self
    }

    /// Invocations in call order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.inner
            .lock()
            .map(|state| state.calls.iter().map(|(inv, _)| inv.clone()).collect())
            .unwrap_or_default()
    }

    /// Invocations rendered as command lines.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }

    pub fn working_dirs(&self) -> Vec<PathBuf> {
        self.inner
            .lock()
            .map(|state| state.calls.iter().map(|(_, cwd)| cwd.clone()).collect())
            .unwrap_or_default()
    }
}

impl ProcessRunner for RecordingProcessRunner {
    fn is_available(&self, program: &str) -> bool {
        self.inner
            .lock()
            .map(|state| !state.unavailable.contains(program))
            .unwrap_or(false)
    }

    fn run(&self, invocation: &Invocation, cwd: &Path) -> SiteforgeResult<()> {
        let mut state = self.inner.lock().map_err(|_| ApplicationError::LockError)?;
        state.calls.push((invocation.clone(), cwd.to_path_buf()));

        if state.failing.contains(&invocation.program) {
            return Err(ApplicationError::ToolFailed {
                command: invocation.to_string(),
                status: Some(1),
            }
            .into());
        }
        Ok(())
    }
}
