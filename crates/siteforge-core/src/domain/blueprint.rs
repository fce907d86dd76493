//! The declarative scaffold table.
//!
//! A [`Blueprint`] lists every file the scaffolder owns together with the
//! rule for writing it, the dev dependencies to install, and the script
//! aliases to merge into `package.json`. The service walks it stage by stage
//! with one generic apply routine, so the write rules live here as data.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::{DomainError, Permissions, RelativePath, RenderContext};

/// Rule deciding whether a blueprint file is written on a given run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WritePolicy {
    /// Write only when nothing exists at the path.
    CreateIfAbsent,
    /// Replace the content on every run.
    AlwaysOverwrite,
    /// Write only when the gate directory was absent before its stage began.
    ///
    /// Every entry sharing a gate is written or skipped as a unit.
    GatedOn(RelativePath),
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateIfAbsent => f.write_str("create-if-absent"),
            Self::AlwaysOverwrite => f.write_str("always-overwrite"),
            Self::GatedOn(gate) => write!(f, "gated-on {gate}/"),
        }
    }
}

impl Serialize for WritePolicy {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Which scaffold step owns a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    SiteConfig,
    SourceTree,
    ToolConfig,
    AuditConfig,
    CommitHook,
    CiPipeline,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::SiteConfig => "site-config",
            Self::SourceTree => "source-tree",
            Self::ToolConfig => "tool-config",
            Self::AuditConfig => "audit-config",
            Self::CommitHook => "commit-hook",
            Self::CiPipeline => "ci-pipeline",
        };
        f.write_str(s)
    }
}

/// File content, either used verbatim or rendered through a [`RenderContext`].
#[derive(Debug, Clone)]
pub enum TemplateContent {
    Literal(&'static str),
    Parameterized(&'static str),
}

impl TemplateContent {
    pub fn render(&self, ctx: &RenderContext) -> String {
        match self {
            Self::Literal(s) => (*s).to_string(),
            Self::Parameterized(s) => ctx.render(s),
        }
    }
}

/// One file the scaffolder owns.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: RelativePath,
    pub stage: Stage,
    pub policy: WritePolicy,
    pub content: TemplateContent,
    pub permissions: Permissions,
}

impl FileEntry {
    pub fn new(
        path: impl Into<RelativePath>,
        stage: Stage,
        policy: WritePolicy,
        content: TemplateContent,
    ) -> Self {
        Self {
            path: path.into(),
            stage,
            policy,
            content,
            permissions: Permissions::default(),
        }
    }

    pub fn executable(mut self) -> Self {
        self.permissions = Permissions::executable();
        self
    }
}

/// Whether an existing script alias may be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptPolicy {
    /// Set only if the alias is missing; user customisations win.
    IfAbsent,
    /// Always reset to the canonical command.
    Overwrite,
}

/// A named `package.json` script with its canonical command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptAlias {
    pub name: String,
    /// Command template; may reference `{{RUN}}`.
    pub command: String,
    pub policy: ScriptPolicy,
}

impl ScriptAlias {
    pub fn new(name: impl Into<String>, command: impl Into<String>, policy: ScriptPolicy) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            policy,
        }
    }
}

/// A development dependency and the semver range it is installed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevDependency {
    pub name: String,
    pub range: String,
}

impl DevDependency {
    pub fn new(name: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            range: range.into(),
        }
    }

    /// `name@range`, as package managers accept it on the command line.
    pub fn spec(&self) -> String {
        format!("{}@{}", self.name, self.range)
    }
}

/// The complete scaffold table.
#[derive(Debug, Clone, Default)]
pub struct Blueprint {
    pub dev_dependencies: Vec<DevDependency>,
    pub scripts: Vec<ScriptAlias>,
    pub files: Vec<FileEntry>,
    /// Tool run through the package manager to activate git hooks.
    pub hook_manager: Option<String>,
}

impl Blueprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dev_dependency(
        mut self,
        name: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        self.dev_dependencies.push(DevDependency::new(name, range));
        self
    }

    pub fn with_script(mut self, alias: ScriptAlias) -> Self {
        self.scripts.push(alias);
        self
    }

    pub fn with_file(mut self, entry: FileEntry) -> Self {
        self.files.push(entry);
        self
    }

    pub fn with_hook_manager(mut self, tool: impl Into<String>) -> Self {
        self.hook_manager = Some(tool.into());
        self
    }

    /// Files owned by `stage`, in table order.
    pub fn stage(&self, stage: Stage) -> impl Iterator<Item = &FileEntry> {
        self.files.iter().filter(move |f| f.stage == stage)
    }

    pub fn file(&self, path: &str) -> Option<&FileEntry> {
        let wanted = RelativePath::new(path);
        self.files.iter().find(|f| f.path == wanted)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.files.is_empty() {
            return Err(DomainError::InvalidBlueprint("no files declared".into()));
        }

        let mut seen = HashSet::new();
        for entry in &self.files {
            if entry.path.as_path().is_absolute() {
                return Err(DomainError::AbsolutePathNotAllowed {
                    path: entry.path.to_string(),
                });
            }
            if !seen.insert(&entry.path) {
                return Err(DomainError::DuplicatePath {
                    path: entry.path.to_string(),
                });
            }
            if let WritePolicy::GatedOn(gate) = &entry.policy {
                if entry.path == *gate || !entry.path.starts_with(gate) {
                    return Err(DomainError::GateMismatch {
                        path: entry.path.to_string(),
                        gate: gate.to_string(),
                    });
                }
            }
        }

        let mut packages = HashSet::new();
        for dep in &self.dev_dependencies {
            if !packages.insert(dep.name.as_str()) {
                return Err(DomainError::InvalidBlueprint(format!(
                    "dev dependency '{}' listed twice",
                    dep.name
                )));
            }
        }

        let mut names = HashSet::new();
        for alias in &self.scripts {
            if !names.insert(alias.name.as_str()) {
                return Err(DomainError::DuplicateScript {
                    name: alias.name.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overwrite(path: &str) -> FileEntry {
        FileEntry::new(
            path,
            Stage::ToolConfig,
            WritePolicy::AlwaysOverwrite,
            TemplateContent::Literal("{}"),
        )
    }

    #[test]
    fn empty_blueprint_is_invalid() {
        assert!(Blueprint::new().validate().is_err());
    }

    #[test]
    fn duplicate_paths_rejected() {
        let bp = Blueprint::new()
            .with_file(overwrite(".prettierrc"))
            .with_file(overwrite(".prettierrc"));
        assert!(matches!(
            bp.validate(),
            Err(DomainError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn gated_entry_must_live_under_gate() {
        let bp = Blueprint::new().with_file(FileEntry::new(
            "lib/index.njk",
            Stage::SourceTree,
            WritePolicy::GatedOn(RelativePath::new("src")),
            TemplateContent::Literal(""),
        ));
        assert!(matches!(
            bp.validate(),
            Err(DomainError::GateMismatch { .. })
        ));
    }

    #[test]
    fn duplicate_script_rejected() {
        let bp = Blueprint::new()
            .with_file(overwrite(".eslintrc.json"))
            .with_script(ScriptAlias::new("lint", "a", ScriptPolicy::Overwrite))
            .with_script(ScriptAlias::new("lint", "b", ScriptPolicy::Overwrite));
        assert!(matches!(
            bp.validate(),
            Err(DomainError::DuplicateScript { .. })
        ));
    }

    #[test]
    fn stage_filter_keeps_table_order() {
        let bp = Blueprint::new()
            .with_file(overwrite("b"))
            .with_file(FileEntry::new(
                "c",
                Stage::CiPipeline,
                WritePolicy::AlwaysOverwrite,
                TemplateContent::Literal(""),
            ))
            .with_file(overwrite("a"));
        let paths: Vec<_> = bp.stage(Stage::ToolConfig).map(|f| f.path.to_string()).collect();
        assert_eq!(paths, vec!["b", "a"]);
    }

    #[test]
    fn policy_display() {
        assert_eq!(WritePolicy::CreateIfAbsent.to_string(), "create-if-absent");
        assert_eq!(
            WritePolicy::GatedOn(RelativePath::new("src")).to_string(),
            "gated-on src/"
        );
    }

    #[test]
    fn dev_dependency_spec_keeps_scope() {
        let dep = DevDependency::new("@11ty/eleventy", "^2");
        assert_eq!(dep.spec(), "@11ty/eleventy@^2");
    }

    #[test]
    fn duplicate_dev_dependency_rejected() {
        let bp = Blueprint::new()
            .with_file(overwrite(".eslintrc.json"))
            .with_dev_dependency("eslint", "^8")
            .with_dev_dependency("eslint", "^9");
        assert!(matches!(
            bp.validate(),
            Err(DomainError::InvalidBlueprint(_))
        ));
    }

    #[test]
    fn executable_sets_flag() {
        assert!(overwrite(".husky/pre-commit").executable().permissions.executable_flag());
    }
}
