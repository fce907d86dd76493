//! Per-run record of what the scaffolder did.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{ScriptChange, Stage};

/// The nine scaffold steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    EnsureManifest,
    InstallDependencies,
    SiteConfig,
    SourceTree,
    ToolConfig,
    AuditConfig,
    ManifestScripts,
    CommitHook,
    CiPipeline,
}

impl Step {
    pub const ALL: [Step; 9] = [
        Self::EnsureManifest,
        Self::InstallDependencies,
        Self::SiteConfig,
        Self::SourceTree,
        Self::ToolConfig,
        Self::AuditConfig,
        Self::ManifestScripts,
        Self::CommitHook,
        Self::CiPipeline,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            Self::EnsureManifest => "Project manifest",
            Self::InstallDependencies => "Development dependencies",
            Self::SiteConfig => "Site generator config",
            Self::SourceTree => "Source tree",
            Self::ToolConfig => "Formatter and linter configs",
            Self::AuditConfig => "Performance audit config",
            Self::ManifestScripts => "Script aliases",
            Self::CommitHook => "Commit hook",
            Self::CiPipeline => "CI pipeline",
        }
    }
}

impl From<Stage> for Step {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::SiteConfig => Self::SiteConfig,
            Stage::SourceTree => Self::SourceTree,
            Stage::ToolConfig => Self::ToolConfig,
            Stage::AuditConfig => Self::AuditConfig,
            Stage::CommitHook => Self::CommitHook,
            Stage::CiPipeline => Self::CiPipeline,
        }
    }
}

/// What happened to a single subject (file, package, alias or command).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Created,
    Overwritten,
    Unchanged,
    Skipped,
    Added,
    Preserved,
    Invoked,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Overwritten => "overwritten",
            Self::Unchanged => "unchanged",
            Self::Skipped => "skipped",
            Self::Added => "added",
            Self::Preserved => "preserved",
            Self::Invoked => "invoked",
        };
        f.write_str(s)
    }
}

impl From<ScriptChange> for Outcome {
    fn from(change: ScriptChange) -> Self {
        match change {
            ScriptChange::Added => Self::Added,
            ScriptChange::Overwritten => Self::Overwritten,
            ScriptChange::Unchanged => Self::Unchanged,
            ScriptChange::Preserved => Self::Preserved,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub subject: String,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Action {
    pub fn new(subject: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            subject: subject.into(),
            outcome,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: Step,
    pub actions: Vec<Action>,
}

impl StepReport {
    pub fn new(step: Step) -> Self {
        Self {
            step,
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn with(mut self, action: Action) -> Self {
        self.push(action);
        self
    }
}

/// Everything one scaffold run did, step by step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    pub dry_run: bool,
    pub steps: Vec<StepReport>,
}

impl ScaffoldReport {
    pub fn new(root: &Path, dry_run: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            dry_run,
            steps: Vec::with_capacity(Step::ALL.len()),
        }
    }

    pub fn push(&mut self, step: StepReport) {
        self.steps.push(step);
    }

    pub fn step(&self, step: Step) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.step == step)
    }

    /// Outcome recorded for `subject` in any step (first match).
    pub fn outcome_of(&self, subject: &str) -> Option<Outcome> {
        self.actions()
            .find(|a| a.subject == subject)
            .map(|a| a.outcome)
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.actions().filter(|a| a.outcome == outcome).count()
    }

    /// True if the run wrote or changed anything.
    pub fn changed_anything(&self) -> bool {
        self.actions().any(|a| {
            matches!(
                a.outcome,
                Outcome::Created | Outcome::Overwritten | Outcome::Added | Outcome::Invoked
            )
        })
    }

    fn actions(&self) -> impl Iterator<Item = &Action> {
        self.steps.iter().flat_map(|s| s.actions.iter())
    }
}
