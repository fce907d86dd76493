//! The blueprint that ships with Siteforge.
//!
//! An Eleventy site with Prettier, ESLint and Stylelint, a Husky pre-commit
//! hook, Lighthouse CI, and a GitHub Actions pipeline deploying `_site` to
//! GitHub Pages. File bodies live under `templates/` and are embedded at
//! compile time.

use siteforge_core::domain::{
    Blueprint, FileEntry, RelativePath, ScriptAlias, ScriptPolicy, Stage, TemplateContent,
    WritePolicy,
};

/// Directory whose presence closes the source-tree gate.
pub const SOURCE_ROOT: &str = "src";

/// Dev dependencies with the major line the generated configs target.
///
/// ESLint stays on 8: the configs are `.eslintrc.json`/`.eslintignore`,
/// which ESLint 9 no longer reads. `prepare: husky` needs Husky 9.
const DEV_DEPENDENCIES: &[(&str, &str)] = &[
    ("@11ty/eleventy", "^2"),
    ("eslint", "^8"),
    ("eslint-config-prettier", "^9"),
    ("prettier", "^3"),
    ("stylelint", "^16"),
    ("stylelint-config-standard", "^36"),
    ("husky", "^9"),
    ("@lhci/cli", "^0.14"),
];

/// Build the default static-site blueprint.
pub fn builtin_blueprint() -> Blueprint {
    let mut blueprint = Blueprint::new().with_hook_manager("husky");

    for (name, range) in DEV_DEPENDENCIES {
        blueprint = blueprint.with_dev_dependency(*name, *range);
    }
    for alias in scripts() {
        blueprint = blueprint.with_script(alias);
    }
    for entry in files() {
        blueprint = blueprint.with_file(entry);
    }
    blueprint
}

fn scripts() -> Vec<ScriptAlias> {
    use ScriptPolicy::{IfAbsent, Overwrite};

    vec![
        // Users customise how the site is served and built.
        ScriptAlias::new("dev", "eleventy --serve", IfAbsent),
        ScriptAlias::new("build", "eleventy", IfAbsent),
        ScriptAlias::new("lint:js", "eslint .", Overwrite),
        ScriptAlias::new("lint:css", "stylelint \"src/**/*.css\"", Overwrite),
        ScriptAlias::new("lint", "{{RUN}} lint:js && {{RUN}} lint:css", Overwrite),
        ScriptAlias::new("format", "prettier --write .", Overwrite),
        ScriptAlias::new("format:check", "prettier --check .", Overwrite),
        ScriptAlias::new("lhci", "lhci autorun", Overwrite),
        ScriptAlias::new(
            "precommit",
            "{{RUN}} format:check && {{RUN}} lint",
            Overwrite,
        ),
        ScriptAlias::new("prepare", "husky", Overwrite),
    ]
}

fn files() -> Vec<FileEntry> {
    use TemplateContent::{Literal, Parameterized};
    use WritePolicy::{AlwaysOverwrite, CreateIfAbsent, GatedOn};

    let src = || GatedOn(RelativePath::new(SOURCE_ROOT));

    vec![
        FileEntry::new(
            ".eleventy.js",
            Stage::SiteConfig,
            CreateIfAbsent,
            Literal(include_str!("../templates/eleventy.js")),
        ),
        FileEntry::new(
            "src/_includes/layouts/base.njk",
            Stage::SourceTree,
            src(),
            Literal(include_str!("../templates/base.njk")),
        ),
        FileEntry::new(
            "src/index.njk",
            Stage::SourceTree,
            src(),
            Parameterized(include_str!("../templates/index.njk")),
        ),
        FileEntry::new(
            "src/css/style.css",
            Stage::SourceTree,
            src(),
            Literal(include_str!("../templates/style.css")),
        ),
        FileEntry::new(
            ".prettierrc",
            Stage::ToolConfig,
            AlwaysOverwrite,
            Literal(include_str!("../templates/prettierrc.json")),
        ),
        FileEntry::new(
            ".prettierignore",
            Stage::ToolConfig,
            AlwaysOverwrite,
            Literal(include_str!("../templates/prettierignore")),
        ),
        FileEntry::new(
            ".eslintrc.json",
            Stage::ToolConfig,
            AlwaysOverwrite,
            Literal(include_str!("../templates/eslintrc.json")),
        ),
        FileEntry::new(
            ".eslintignore",
            Stage::ToolConfig,
            AlwaysOverwrite,
            Literal(include_str!("../templates/eslintignore")),
        ),
        FileEntry::new(
            ".stylelintrc.json",
            Stage::ToolConfig,
            AlwaysOverwrite,
            Literal(include_str!("../templates/stylelintrc.json")),
        ),
        FileEntry::new(
            ".stylelintignore",
            Stage::ToolConfig,
            AlwaysOverwrite,
            Literal(include_str!("../templates/stylelintignore")),
        ),
        FileEntry::new(
            "lighthouserc.json",
            Stage::AuditConfig,
            AlwaysOverwrite,
            Literal(include_str!("../templates/lighthouserc.json")),
        ),
        FileEntry::new(
            ".husky/pre-commit",
            Stage::CommitHook,
            AlwaysOverwrite,
            Parameterized(include_str!("../templates/pre-commit")),
        )
        .executable(),
        FileEntry::new(
            ".github/workflows/ci.yml",
            Stage::CiPipeline,
            AlwaysOverwrite,
            Parameterized(include_str!("../templates/ci.yml")),
        ),
    ]
}
