//! `siteforge config`: inspect and initialise configuration.

use std::path::Path;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            output.print(&to_toml(&config)?)?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }

        ConfigCommands::Init { force } => {
            let path = AppConfig::config_path();
            write_config(&path, &config, force)?;
            output.success(&format!("Wrote {}", path.display()))?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    config.get(key).ok_or_else(|| CliError::ConfigError {
        message: format!(
            "Unknown config key: '{key}' (expected one of: {})",
            AppConfig::KEYS.join(", ")
        ),
        source: None,
    })
}

fn to_toml(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Write `config` to `path`, creating parent directories. Refuses to replace
/// an existing file unless `force` is set.
fn write_config(path: &Path, config: &AppConfig, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::ConfigExists {
            path: path.to_path_buf(),
        });
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, to_toml(config)?)
        .with_cli_context(|| format!("writing {}", path.display()))
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "tools.package_manager").unwrap(), "npm");
        assert_eq!(get_config_value(&cfg, "tools.hooks").unwrap(), "true");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "defaults.lang"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn init_refuses_to_clobber_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("siteforge/config.toml");

        write_config(&path, &AppConfig::default(), false).unwrap();
        let again = write_config(&path, &AppConfig::default(), false);
        assert!(matches!(again, Err(CliError::ConfigExists { .. })));

        write_config(&path, &AppConfig::default(), true).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("[tools]"));
    }
}
