//! Scaffold Service - main application orchestrator.
//!
//! Runs the fixed step sequence against a target directory:
//! 1. Ensure `package.json`
//! 2. Install dev dependencies
//! 3. Site generator config (create-if-absent)
//! 4. Source tree (gated on the source root)
//! 5. Formatter/linter configs (always overwrite)
//! 6. Performance audit config (always overwrite)
//! 7. Merge script aliases
//! 8. Commit hook
//! 9. CI pipeline
//!
//! Every step is idempotent. The run is fail-fast with no rollback: the
//! first error aborts and files written by earlier steps stay on disk.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, ProcessRunner},
        report::{Action, Outcome, ScaffoldReport, Step, StepReport},
    },
    domain::{
        Blueprint, FileEntry, Invocation, Manifest, PackageManager, RelativePath, RenderContext,
        Stage, WritePolicy, package_name_from,
    },
    error::SiteforgeResult,
};

pub const MANIFEST_FILE: &str = "package.json";

/// Knobs for one scaffold run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaffoldOptions {
    pub package_manager: PackageManager,
    /// Invoke the package manager and hook manager.
    pub install: bool,
    /// Run the commit-hook step at all.
    pub hooks: bool,
    /// Compute outcomes without writing or invoking anything.
    pub dry_run: bool,
}

impl ScaffoldOptions {
    pub fn new(package_manager: PackageManager) -> Self {
        Self {
            package_manager,
            install: true,
            hooks: true,
            dry_run: false,
        }
    }

    pub fn with_install(mut self, install: bool) -> Self {
        self.install = install;
        self
    }

    pub fn with_hooks(mut self, hooks: bool) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self::new(PackageManager::default())
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    blueprint: Blueprint,
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn ProcessRunner>,
    options: ScaffoldOptions,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given blueprint and adapters.
    pub fn new(
        blueprint: Blueprint,
        filesystem: Box<dyn Filesystem>,
        runner: Box<dyn ProcessRunner>,
        options: ScaffoldOptions,
    ) -> Self {
        Self {
            blueprint,
            filesystem,
            runner,
            options,
        }
    }

    /// Run every step in order against `root`.
    #[instrument(
        skip_all,
        fields(
            root = %root.as_ref().display(),
            package_manager = %self.options.package_manager,
            dry_run = self.options.dry_run
        )
    )]
    pub fn run(&self, root: impl AsRef<Path>) -> SiteforgeResult<ScaffoldReport> {
        let root = root.as_ref();
        self.blueprint.validate()?;

        if !self.filesystem.exists(root) && !self.options.dry_run {
            debug!("creating target directory");
            self.filesystem.create_dir_all(root)?;
        }

        info!("Scaffolding static site");
        let mut report = ScaffoldReport::new(root, self.options.dry_run);

        report.push(self.ensure_manifest(root)?);
        report.push(self.install_dependencies(root)?);
        report.push(self.ensure_site_config(root)?);
        report.push(self.ensure_source_tree(root)?);
        report.push(self.write_tool_configs(root)?);
        report.push(self.write_audit_config(root)?);
        report.push(self.merge_manifest_scripts(root)?);
        report.push(self.install_commit_hook(root)?);
        report.push(self.write_ci_pipeline(root)?);

        info!(
            created = report.count(Outcome::Created),
            overwritten = report.count(Outcome::Overwritten),
            skipped = report.count(Outcome::Skipped),
            "Scaffold completed"
        );
        Ok(report)
    }

    /// Create a default `package.json` if none exists.
    ///
    /// An existing manifest is parsed so a malformed one stops the run before
    /// any other file is touched.
    pub fn ensure_manifest(&self, root: &Path) -> SiteforgeResult<StepReport> {
        let step = StepReport::new(Step::EnsureManifest);
        let path = root.join(MANIFEST_FILE);

        if self.filesystem.exists(&path) {
            let text = self.filesystem.read_to_string(&path)?;
            Manifest::parse(&text)?;
            debug!("manifest already present");
            return Ok(step.with(Action::new(MANIFEST_FILE, Outcome::Skipped)));
        }

        let manifest = Manifest::new_default(&default_package_name(root));
        if !self.options.dry_run {
            self.filesystem
                .replace_file(&path, &manifest.to_pretty_string())?;
        }
        info!(name = manifest.name().unwrap_or_default(), "Created package.json");
        Ok(step.with(Action::new(MANIFEST_FILE, Outcome::Created)))
    }

    /// Add the blueprint's dev dependencies that the manifest does not list yet.
    ///
    /// With installs enabled the package manager is asked for `name@range`
    /// and records the resolved version itself. With installs disabled the
    /// blueprint range is written straight into `devDependencies`.
    pub fn install_dependencies(&self, root: &Path) -> SiteforgeResult<StepReport> {
        let mut step = StepReport::new(Step::InstallDependencies);
        let mut manifest = self.load_manifest(root)?;
        let missing = manifest.missing_dependencies(&self.blueprint.dev_dependencies);

        for dep in &self.blueprint.dev_dependencies {
            if !missing.contains(&dep) {
                step.push(Action::new(dep.name.as_str(), Outcome::Preserved));
            }
        }

        if missing.is_empty() {
            debug!("all dev dependencies already present");
            return Ok(step);
        }

        if self.options.install {
            let invocation = self
                .options
                .package_manager
                .install_dev(missing.iter().map(|dep| dep.spec()));
            if !self.options.dry_run {
                self.invoke(&invocation, root)?;
            }
            step.push(Action::new(invocation.to_string(), Outcome::Invoked));
            for dep in &missing {
                step.push(Action::new(dep.name.as_str(), Outcome::Added));
            }
        } else {
            for dep in &missing {
                manifest.add_dev_dependency(&dep.name, &dep.range);
                step.push(
                    Action::new(dep.name.as_str(), Outcome::Added)
                        .with_note("recorded, not installed"),
                );
            }
            if !self.options.dry_run {
                self.save_manifest(root, &manifest)?;
            }
        }

        info!(count = missing.len(), "Added dev dependencies");
        Ok(step)
    }

    /// Write the site generator config unless one already exists.
    pub fn ensure_site_config(&self, root: &Path) -> SiteforgeResult<StepReport> {
        self.apply_stage(root, Stage::SiteConfig)
    }

    /// Write the default layout, homepage and stylesheet, all or nothing.
    pub fn ensure_source_tree(&self, root: &Path) -> SiteforgeResult<StepReport> {
        self.apply_stage(root, Stage::SourceTree)
    }

    pub fn write_tool_configs(&self, root: &Path) -> SiteforgeResult<StepReport> {
        self.apply_stage(root, Stage::ToolConfig)
    }

    pub fn write_audit_config(&self, root: &Path) -> SiteforgeResult<StepReport> {
        self.apply_stage(root, Stage::AuditConfig)
    }

    /// Unconditionally replace `path` with `content`. Last write wins.
    pub fn write_fixed_config(
        &self,
        root: &Path,
        path: &RelativePath,
        content: &str,
    ) -> SiteforgeResult<Outcome> {
        self.write_file(&root.join(path.as_path()), content, false)
    }

    /// Merge the blueprint's script aliases into `package.json`.
    pub fn merge_manifest_scripts(&self, root: &Path) -> SiteforgeResult<StepReport> {
        let mut step = StepReport::new(Step::ManifestScripts);
        let mut manifest = self.load_manifest(root)?;
        let ctx = self.context(root);

        let changes = manifest.merge_scripts(
            self.blueprint
                .scripts
                .iter()
                .map(|alias| (alias, ctx.render(&alias.command))),
        );

        let mut dirty = false;
        for (name, change) in changes {
            let outcome = Outcome::from(change);
            dirty |= matches!(outcome, Outcome::Added | Outcome::Overwritten);
            step.push(Action::new(name, outcome));
        }

        if dirty && !self.options.dry_run {
            self.save_manifest(root, &manifest)?;
        }
        debug!(changed = dirty, "Merged script aliases");
        Ok(step)
    }

    /// Activate the hook manager, then write the hook script.
    pub fn install_commit_hook(&self, root: &Path) -> SiteforgeResult<StepReport> {
        if !self.options.hooks {
            debug!("commit hook disabled");
            return Ok(StepReport::new(Step::CommitHook)
                .with(Action::new("commit hook", Outcome::Skipped).with_note("disabled")));
        }

        let mut step = StepReport::new(Step::CommitHook);
        if let Some(tool) = &self.blueprint.hook_manager {
            if self.options.install {
                let invocation = self.options.package_manager.exec(tool);
                if !self.options.dry_run {
                    self.invoke(&invocation, root)?;
                }
                step.push(Action::new(invocation.to_string(), Outcome::Invoked));
            }
        }

        step.actions
            .extend(self.apply_stage(root, Stage::CommitHook)?.actions);
        Ok(step)
    }

    pub fn write_ci_pipeline(&self, root: &Path) -> SiteforgeResult<StepReport> {
        self.apply_stage(root, Stage::CiPipeline)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Apply every blueprint entry of `stage` with its write policy.
    #[instrument(skip(self, root))]
    fn apply_stage(&self, root: &Path, stage: Stage) -> SiteforgeResult<StepReport> {
        let ctx = self.context(root);

        // Gates are sampled before the stage writes anything, so creating the
        // first gated file cannot open the gate for the rest.
        let mut gates: HashMap<&RelativePath, bool> = HashMap::new();
        for entry in self.blueprint.stage(stage) {
            if let WritePolicy::GatedOn(gate) = &entry.policy {
                gates
                    .entry(gate)
                    .or_insert_with(|| !self.filesystem.exists(&root.join(gate.as_path())));
            }
        }

        let mut step = StepReport::new(stage.into());
        for entry in self.blueprint.stage(stage) {
            let outcome = self.apply_entry(root, entry, &ctx, &gates)?;
            step.push(Action::new(entry.path.to_string(), outcome));
        }
        Ok(step)
    }

    fn apply_entry(
        &self,
        root: &Path,
        entry: &FileEntry,
        ctx: &RenderContext,
        gates: &HashMap<&RelativePath, bool>,
    ) -> SiteforgeResult<Outcome> {
        let path = root.join(entry.path.as_path());

        match &entry.policy {
            WritePolicy::CreateIfAbsent if self.filesystem.exists(&path) => {
                debug!(path = %entry.path, "exists, leaving untouched");
                return Ok(Outcome::Skipped);
            }
            WritePolicy::GatedOn(gate) if !gates.get(gate).copied().unwrap_or(false) => {
                debug!(path = %entry.path, gate = %gate, "gate directory exists, skipping");
                return Ok(Outcome::Skipped);
            }
            _ => {}
        }

        let content = entry.content.render(ctx);
        self.write_file(&path, &content, entry.permissions.executable_flag())
    }

    fn write_file(&self, path: &Path, content: &str, executable: bool) -> SiteforgeResult<Outcome> {
        let outcome = if !self.filesystem.exists(path) {
            Outcome::Created
        } else if self
            .filesystem
            .read_to_string(path)
            .is_ok_and(|current| current == content)
        {
            Outcome::Unchanged
        } else {
            Outcome::Overwritten
        };

        if self.options.dry_run {
            return Ok(outcome);
        }

        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(path, content)?;
        if executable {
            self.filesystem.set_permissions(path, true)?;
        }

        debug!(path = %path.display(), %outcome, "wrote file");
        Ok(outcome)
    }

    /// Read and parse `package.json`.
    ///
    /// In a dry run the manifest may not exist yet; the default stands in.
    fn load_manifest(&self, root: &Path) -> SiteforgeResult<Manifest> {
        let path = root.join(MANIFEST_FILE);
        if !self.filesystem.exists(&path) {
            if self.options.dry_run {
                return Ok(Manifest::new_default(&default_package_name(root)));
            }
            return Err(ApplicationError::ManifestMissing { path }.into());
        }
        let text = self.filesystem.read_to_string(&path)?;
        Ok(Manifest::parse(&text)?)
    }

    fn save_manifest(&self, root: &Path, manifest: &Manifest) -> SiteforgeResult<()> {
        self.filesystem
            .replace_file(&root.join(MANIFEST_FILE), &manifest.to_pretty_string())
    }

    fn invoke(&self, invocation: &Invocation, cwd: &Path) -> SiteforgeResult<()> {
        if !self.runner.is_available(&invocation.program) {
            return Err(ApplicationError::ToolUnavailable {
                program: invocation.program.clone(),
            }
            .into());
        }
        info!(command = %invocation, "Running external tool");
        self.runner.run(invocation, cwd)
    }

    /// Render context named after the manifest, or the directory when there is none.
    fn context(&self, root: &Path) -> RenderContext {
        let name = self
            .filesystem
            .read_to_string(&root.join(MANIFEST_FILE))
            .ok()
            .and_then(|text| Manifest::parse(&text).ok())
            .and_then(|m| m.name().map(str::to_string))
            .unwrap_or_else(|| default_package_name(root));
        RenderContext::new(name, self.options.package_manager)
    }
}

fn default_package_name(root: &Path) -> String {
    package_name_from(
        root.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default(),
    )
}
