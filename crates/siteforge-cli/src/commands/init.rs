//! Implementation of `siteforge init` (also the bare `siteforge` invocation).
//!
//! Responsibility: resolve the target directory and run options from flags
//! and config, call the core scaffold service, and display the report.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use siteforge_adapters::{LocalFilesystem, SystemProcessRunner, builtin_blueprint};
use siteforge_core::{
    application::{Outcome, ScaffoldOptions, ScaffoldReport, ScaffoldService},
    domain::PackageManager,
};

use crate::{
    cli::{InitArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the scaffold.
///
/// 1. Resolve and (unless dry-run) create the target directory
/// 2. Merge flags over config into `ScaffoldOptions`
/// 3. Run every step via `ScaffoldService`
/// 4. Print the per-step report and a summary
#[instrument(skip_all)]
pub fn execute(args: InitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let root = resolve_target(args.path.as_deref(), args.dry_run)?;
    let options = build_options(&args, &config);

    debug!(
        root = %root.display(),
        package_manager = %options.package_manager,
        install = options.install,
        hooks = options.hooks,
        dry_run = options.dry_run,
        "Options resolved"
    );

    let service = ScaffoldService::new(
        builtin_blueprint(),
        Box::new(LocalFilesystem::new()),
        Box::new(SystemProcessRunner::new()),
        options,
    );

    if output.format() != OutputFormat::Json {
        let verb = if options.dry_run { "Planning" } else { "Scaffolding" };
        output.header(&format!("{verb} {} with {}", root.display(), options.package_manager))?;
    }

    let report = service.run(&root)?;
    info!(root = %root.display(), "Scaffold finished");

    output.report(&report)?;
    if output.format() != OutputFormat::Json {
        output.print("")?;
        summarize(&report, &output)?;
    }
    Ok(())
}

/// Absolute target directory. A missing directory is created first unless
/// this is a dry run.
fn resolve_target(path: Option<&Path>, dry_run: bool) -> CliResult<PathBuf> {
    let requested = path.unwrap_or_else(|| Path::new("."));

    if requested.exists() && !requested.is_dir() {
        return Err(CliError::NotADirectory {
            path: requested.to_path_buf(),
        });
    }

    if !requested.exists() {
        if dry_run {
            let cwd = std::env::current_dir()
                .with_cli_context(|| "reading the current directory")?;
            return Ok(cwd.join(requested));
        }
        std::fs::create_dir_all(requested)
            .with_cli_context(|| format!("creating {}", requested.display()))?;
    }

    requested
        .canonicalize()
        .with_cli_context(|| format!("resolving {}", requested.display()))
}

/// Flags override config; `--skip-install` and `--no-hooks` can only turn
/// behaviour off.
fn build_options(args: &InitArgs, config: &AppConfig) -> ScaffoldOptions {
    let package_manager = args
        .package_manager
        .map(PackageManager::from)
        .unwrap_or(config.tools.package_manager);

    ScaffoldOptions::new(package_manager)
        .with_install(config.tools.install && !args.skip_install)
        .with_hooks(config.tools.hooks && !args.no_hooks)
        .with_dry_run(args.dry_run)
}

fn summarize(report: &ScaffoldReport, output: &OutputManager) -> CliResult<()> {
    let written = report.count(Outcome::Created) + report.count(Outcome::Overwritten);
    let line = format!(
        "{written} file(s) written, {} unchanged, {} skipped, {} package(s) added",
        report.count(Outcome::Unchanged),
        report.count(Outcome::Skipped),
        report.count(Outcome::Added),
    );

    if report.dry_run {
        output.info(&format!("Dry run: {line}"))?;
    } else if report.changed_anything() {
        output.success(&line)?;
    } else {
        output.success("Already up to date")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PackageManagerArg;

    #[test]
    fn flags_override_config() {
        let mut config = AppConfig::default();
        config.tools.package_manager = PackageManager::Yarn;
        let args = InitArgs {
            package_manager: Some(PackageManagerArg::Pnpm),
            skip_install: true,
            ..InitArgs::default()
        };

        let options = build_options(&args, &config);

        assert_eq!(options.package_manager, PackageManager::Pnpm);
        assert!(!options.install);
        assert!(options.hooks);
    }

    #[test]
    fn config_can_disable_hooks() {
        let mut config = AppConfig::default();
        config.tools.hooks = false;

        let options = build_options(&InitArgs::default(), &config);

        assert_eq!(options.package_manager, PackageManager::Npm);
        assert!(options.install);
        assert!(!options.hooks);
    }

    #[test]
    fn file_target_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("index.html");
        std::fs::write(&file, "").unwrap();

        let err = resolve_target(Some(&file), false).unwrap_err();
        assert!(matches!(err, CliError::NotADirectory { .. }));
    }

    #[test]
    fn missing_target_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/site");

        let root = resolve_target(Some(&target), false).unwrap();

        assert!(target.is_dir());
        assert!(root.is_absolute());
        assert!(root.ends_with("nested/site"));
    }

    #[test]
    fn dry_run_does_not_create_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("site");

        let root = resolve_target(Some(&target), true).unwrap();

        assert!(!target.exists());
        assert!(root.ends_with("site"));
    }
}
