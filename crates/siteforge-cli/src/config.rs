//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call-site, not here)
//! 2. Environment variables, `SITEFORGE_` prefix with `__` between sections
//!    (`SITEFORGE_TOOLS__PACKAGE_MANAGER=pnpm`)
//! 3. `--config FILE`
//! 4. Global file at [`AppConfig::config_path`]
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use siteforge_core::domain::PackageManager;

const ENV_PREFIX: &str = "SITEFORGE";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub tools: ToolsConfig,
    pub output: OutputConfig,
}

/// External tool behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolsConfig {
    pub package_manager: PackageManager,
    /// Run the package manager and hook manager.
    pub install: bool,
    /// Install the commit hook at all.
    pub hooks: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            package_manager: PackageManager::Npm,
            install: true,
            hooks: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Layer defaults, the global file, `config_file` and the environment.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path(), config_file.map(PathBuf::as_path))
    }

    fn load_from(global: &Path, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder()
            .add_source(
                Config::try_from(&Self::default()).context("Failed to encode default config")?,
            )
            .add_source(File::from(global).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the global configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.siteforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "siteforge", "siteforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".siteforge.toml"))
    }

    /// Dotted-key lookup used by `siteforge config get`.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "tools.package_manager" => self.tools.package_manager.to_string(),
            "tools.install" => self.tools.install.to_string(),
            "tools.hooks" => self.tools.hooks.to_string(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            _ => return None,
        };
        Some(value)
    }

    pub const KEYS: [&'static str; 5] = [
        "tools.package_manager",
        "tools.install",
        "tools.hooks",
        "output.no_color",
        "output.format",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.tools.package_manager, PackageManager::Npm);
        assert!(cfg.tools.install);
        assert!(cfg.tools.hooks);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn missing_global_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("absent.toml"), None).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn explicit_file_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let local = dir.path().join("local.toml");
        std::fs::write(&global, "[tools]\npackage_manager = \"yarn\"\nhooks = false\n").unwrap();
        std::fs::write(&local, "[tools]\npackage_manager = \"pnpm\"\n").unwrap();

        let cfg = AppConfig::load_from(&global, Some(&local)).unwrap();

        assert_eq!(cfg.tools.package_manager, PackageManager::Pnpm);
        assert!(!cfg.tools.hooks);
        assert!(cfg.tools.install);
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from(
            &dir.path().join("absent.toml"),
            Some(&dir.path().join("also-absent.toml")),
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_package_manager_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.toml");
        std::fs::write(&file, "[tools]\npackage_manager = \"bun\"\n").unwrap();
        assert!(AppConfig::load_from(&file, None).is_err());
    }

    #[test]
    fn every_listed_key_resolves() {
        let cfg = AppConfig::default();
        for key in AppConfig::KEYS {
            assert!(cfg.get(key).is_some(), "{key}");
        }
        assert_eq!(cfg.get("tools.package_manager").as_deref(), Some("npm"));
        assert_eq!(cfg.get("nope"), None);
    }

    #[test]
    fn round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(text.contains("package_manager = \"npm\""));
    }
}
