//! Implementation of the `siteforge list` command.

use serde::Serialize;
use siteforge_adapters::builtin_blueprint;
use siteforge_core::domain::{
    Blueprint, DevDependency, RelativePath, ScriptPolicy, Stage, WritePolicy,
};

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct FileRow<'a> {
    path: &'a RelativePath,
    stage: Stage,
    policy: &'a WritePolicy,
    executable: bool,
}

#[derive(Debug, Serialize)]
struct ScriptRow<'a> {
    name: &'a str,
    command: &'a str,
    policy: ScriptPolicy,
}

#[derive(Debug, Serialize)]
struct Listing<'a> {
    files: Vec<FileRow<'a>>,
    scripts: Vec<ScriptRow<'a>>,
    dev_dependencies: &'a [DevDependency],
}

impl<'a> Listing<'a> {
    fn from_blueprint(blueprint: &'a Blueprint) -> Self {
        Self {
            files: blueprint
                .files
                .iter()
                .map(|f| FileRow {
                    path: &f.path,
                    stage: f.stage,
                    policy: &f.policy,
                    executable: f.permissions.executable_flag(),
                })
                .collect(),
            scripts: blueprint
                .scripts
                .iter()
                .map(|s| ScriptRow {
                    name: &s.name,
                    command: &s.command,
                    policy: s.policy,
                })
                .collect(),
            dev_dependencies: &blueprint.dev_dependencies,
        }
    }
}

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let blueprint = builtin_blueprint();
    let listing = Listing::from_blueprint(&blueprint);

    match args.format {
        ListFormat::Json => output.json(&listing)?,
        ListFormat::Table => {
            output.header("Managed files:")?;
            for row in &listing.files {
                let mode = if row.executable { " (executable)" } else { "" };
                output.print(&format!("  {:<34} {}{mode}", row.path.to_string(), row.policy))?;
            }

            output.print("")?;
            output.header("Script aliases:")?;
            for row in &listing.scripts {
                let keep = match row.policy {
                    ScriptPolicy::IfAbsent => " (kept if set)",
                    ScriptPolicy::Overwrite => "",
                };
                output.print(&format!("  {:<14} {}{keep}", row.name, row.command))?;
            }

            output.print("")?;
            output.header("Dev dependencies:")?;
            for dep in listing.dev_dependencies {
                output.print(&format!("  {:<28} {}", dep.name, dep.range))?;
            }
        }
    }

    Ok(())
}
