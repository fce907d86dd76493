//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No scaffolding logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use siteforge_core::domain::PackageManager;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "siteforge",
    bin_name = "siteforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Idempotent static-site scaffolding",
    long_about = "Siteforge turns a directory into an Eleventy site with formatting, \
                  linting, a pre-commit hook, Lighthouse CI and a GitHub Pages \
                  pipeline. Re-running it is always safe.",
    after_help = "EXAMPLES:\n\
        \x20 siteforge                       # scaffold the current directory\n\
        \x20 siteforge init ./my-site --package-manager pnpm\n\
        \x20 siteforge init --dry-run\n\
        \x20 siteforge list --format json\n\
        \x20 siteforge completions bash > /usr/share/bash-completion/completions/siteforge",
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute. Without one, the current directory is scaffolded.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold (or re-scaffold) a static site.
    #[command(
        visible_alias = "i",
        about = "Scaffold a static site in a directory",
        after_help = "EXAMPLES:\n\
            \x20 siteforge init\n\
            \x20 siteforge init ./blog --package-manager yarn\n\
            \x20 siteforge init --skip-install --no-hooks"
    )]
    Init(InitArgs),

    /// Show the files Siteforge manages and how each is written.
    #[command(
        visible_alias = "ls",
        about = "List managed files and their write policies",
        after_help = "EXAMPLES:\n\
            \x20 siteforge list\n\
            \x20 siteforge list --format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 siteforge completions bash > ~/.local/share/bash-completion/completions/siteforge\n\
            \x20 siteforge completions zsh  > ~/.zfunc/_siteforge\n\
            \x20 siteforge completions fish > ~/.config/fish/completions/siteforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Siteforge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 siteforge config get tools.package_manager\n\
            \x20 siteforge config list\n\
            \x20 siteforge config init"
    )]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Args)]
pub struct InitArgs {
    /// Target directory; created if missing.
    #[arg(value_name = "PATH", help = "Target directory (default: current directory)")]
    pub path: Option<PathBuf>,

    /// Overrides `tools.package_manager` from config.
    #[arg(
        short = 'p',
        long = "package-manager",
        value_name = "PM",
        value_enum,
        help = "Package manager to install with"
    )]
    pub package_manager: Option<PackageManagerArg>,

    /// Record dev dependencies without installing, and skip the hook manager.
    #[arg(long = "skip-install", help = "Do not run the package manager or hook manager")]
    pub skip_install: bool,

    #[arg(long = "no-hooks", help = "Skip the commit-hook step")]
    pub no_hooks: bool,

    #[arg(
        long = "dry-run",
        help = "Show what would change without writing or running anything"
    )]
    pub dry_run: bool,
}

/// Package managers accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum PackageManagerArg {
    Npm,
    Pnpm,
    Yarn,
}

impl From<PackageManagerArg> for PackageManager {
    fn from(arg: PackageManagerArg) -> Self {
        match arg {
            PackageManagerArg::Npm => Self::Npm,
            PackageManagerArg::Pnpm => Self::Pnpm,
            PackageManagerArg::Yarn => Self::Yarn,
        }
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `tools.package_manager`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the global configuration file.
    Path,
    /// Write the current configuration to the global file.
    Init {
        /// Replace an existing file.
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_has_no_subcommand() {
        let cli = Cli::try_parse_from(["siteforge"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn init_parses_all_flags() {
        let cli = Cli::try_parse_from([
            "siteforge",
            "init",
            "./blog",
            "--package-manager",
            "pnpm",
            "--skip-install",
            "--no-hooks",
            "--dry-run",
        ])
        .unwrap();

        let Some(Commands::Init(args)) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(args.path, Some(PathBuf::from("./blog")));
        assert_eq!(args.package_manager, Some(PackageManagerArg::Pnpm));
        assert!(args.skip_install && args.no_hooks && args.dry_run);
    }

    #[test]
    fn unknown_package_manager_is_rejected() {
        assert!(Cli::try_parse_from(["siteforge", "init", "-p", "bun"]).is_err());
    }

    #[test]
    fn package_manager_arg_maps_to_domain() {
        assert_eq!(PackageManager::from(PackageManagerArg::Yarn), PackageManager::Yarn);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["siteforge", "list", "-vv", "--no-color"]).unwrap();
        assert_eq!(cli.global.verbose, 2);
        assert!(cli.global.no_color);
    }
}
