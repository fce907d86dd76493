//! Integration tests for the `siteforge` binary.
//!
//! Every scaffold here runs with installs disabled so no package manager is
//! needed. `HOME` and `XDG_CONFIG_HOME` point into the temp dir so a developer's
//! global config never leaks in.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn siteforge(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("siteforge");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR")
        .env_remove("SITEFORGE_TOOLS__PACKAGE_MANAGER")
        .env_remove("SITEFORGE_TOOLS__INSTALL")
        .env_remove("SITEFORGE_TOOLS__HOOKS");
    cmd
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn help_describes_the_tool() {
    let temp = TempDir::new().unwrap();
    siteforge(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("static-site"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    siteforge(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn init_scaffolds_empty_directory() {
    let temp = TempDir::new().unwrap();
    let site = temp.path().join("my-site");

    siteforge(temp.path())
        .args(["init", "--skip-install"])
        .arg(&site)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created").or(predicate::str::contains("created")));

    let pkg = read_json(&site.join("package.json"));
    assert_eq!(pkg["name"], "my-site");
    assert!(pkg["devDependencies"].as_object().unwrap().len() >= 6);
    assert_eq!(pkg["scripts"]["precommit"], "npm run format:check && npm run lint");

    for file in [
        ".eleventy.js",
        "src/index.njk",
        "src/_includes/layouts/base.njk",
        "src/css/style.css",
        ".prettierrc",
        ".eslintrc.json",
        ".stylelintrc.json",
        "lighthouserc.json",
        ".husky/pre-commit",
        ".github/workflows/ci.yml",
    ] {
        assert!(site.join(file).is_file(), "{file} missing");
    }
}

#[test]
fn rerun_reports_up_to_date() {
    let temp = TempDir::new().unwrap();
    let site = temp.path().join("site");

    siteforge(temp.path())
        .args(["init", "--skip-install"])
        .arg(&site)
        .assert()
        .success();

    siteforge(temp.path())
        .args(["init", "--skip-install"])
        .arg(&site)
        .assert()
        .success()
        .stdout(predicate::str::contains("Already up to date"));
}

#[test]
fn bare_invocation_scaffolds_current_directory() {
    let temp = TempDir::new().unwrap();
    let site = temp.path().join("Cool Site");
    fs::create_dir(&site).unwrap();

    siteforge(temp.path())
        .current_dir(&site)
        .env("SITEFORGE_TOOLS__INSTALL", "false")
        .assert()
        .success();

    assert_eq!(read_json(&site.join("package.json"))["name"], "cool-site");
}

#[test]
fn dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let site = temp.path().join("preview");

    siteforge(temp.path())
        .args(["init", "--dry-run"])
        .arg(&site)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("npm install --save-dev"));

    assert!(!site.exists());
}

#[test]
fn json_report_lists_every_step() {
    let temp = TempDir::new().unwrap();
    let site = temp.path().join("site");

    let out = siteforge(temp.path())
        .args(["--output-format", "json", "init", "--skip-install", "--no-hooks"])
        .arg(&site)
        .output()
        .unwrap();
    assert!(out.status.success());

    let report: Value = serde_json::from_slice(&out.stdout).unwrap();
    let steps = report["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 9);
    assert_eq!(steps[0]["step"], "ensure-manifest");
    assert_eq!(steps[7]["actions"][0]["outcome"], "skipped");
    assert!(!site.join(".husky/pre-commit").exists());
}

#[test]
fn pnpm_flag_changes_generated_commands() {
    let temp = TempDir::new().unwrap();
    let site = temp.path().join("site");

    siteforge(temp.path())
        .args(["init", "--skip-install", "--package-manager", "pnpm"])
        .arg(&site)
        .assert()
        .success();

    let ci = fs::read_to_string(site.join(".github/workflows/ci.yml")).unwrap();
    assert!(ci.contains("pnpm install --frozen-lockfile"));
    assert_eq!(
        read_json(&site.join("package.json"))["scripts"]["lint"],
        "pnpm run lint:js && pnpm run lint:css"
    );
}

#[test]
fn malformed_manifest_exits_with_user_error() {
    let temp = TempDir::new().unwrap();
    let site = temp.path().join("site");
    fs::create_dir(&site).unwrap();
    fs::write(site.join("package.json"), "{ broken").unwrap();

    siteforge(temp.path())
        .args(["init", "--skip-install"])
        .arg(&site)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("package.json"));

    assert_eq!(fs::read_to_string(site.join("package.json")).unwrap(), "{ broken");
    assert!(!site.join(".eleventy.js").exists());
}

#[test]
fn file_target_exits_with_user_error() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("notes.txt");
    fs::write(&file, "").unwrap();

    siteforge(temp.path())
        .args(["init", "--skip-install"])
        .arg(&file)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a directory"));
}

#[cfg(unix)]
#[test]
fn missing_package_manager_fails_fast() {
    let temp = TempDir::new().unwrap();
    let site = temp.path().join("site");
    let empty_path = temp.path().join("bin");
    fs::create_dir(&empty_path).unwrap();

    siteforge(temp.path())
        .env("PATH", &empty_path)
        .arg("init")
        .arg(&site)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'npm' was not found on PATH"));

    assert!(site.join("package.json").is_file());
    assert!(!site.join(".eleventy.js").exists());
}

#[test]
fn unknown_package_manager_flag_is_rejected() {
    let temp = TempDir::new().unwrap();
    siteforge(temp.path())
        .args(["init", "--package-manager", "bun"])
        .assert()
        .code(2);
}

#[test]
fn list_json_includes_policies() {
    let temp = TempDir::new().unwrap();
    let out = siteforge(temp.path())
        .args(["list", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let listing: Value = serde_json::from_slice(&out.stdout).unwrap();
    let files = listing["files"].as_array().unwrap();
    assert!(
        files
            .iter()
            .any(|f| f["path"] == ".eleventy.js" && f["policy"] == "create-if-absent")
    );
    assert!(
        files
            .iter()
            .any(|f| f["path"] == "src/index.njk" && f["policy"] == "gated-on src/")
    );
}

#[test]
fn config_get_reads_environment() {
    let temp = TempDir::new().unwrap();
    siteforge(temp.path())
        .args(["config", "get", "tools.package_manager"])
        .env("SITEFORGE_TOOLS__PACKAGE_MANAGER", "yarn")
        .assert()
        .success()
        .stdout(predicate::str::diff("yarn\n"));
}

#[test]
fn config_file_flag_is_honoured() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("custom.toml");
    fs::write(&file, "[tools]\nhooks = false\n").unwrap();

    siteforge(temp.path())
        .args(["config", "get", "tools.hooks", "--config"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::diff("false\n"));
}

#[test]
fn invalid_config_exits_four() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("bad.toml");
    fs::write(&file, "[tools]\npackage_manager = \"bun\"\n").unwrap();

    siteforge(temp.path())
        .args(["list", "--config"])
        .arg(&file)
        .assert()
        .code(4);
}

#[test]
fn unknown_config_key_exits_four() {
    let temp = TempDir::new().unwrap();
    siteforge(temp.path())
        .args(["config", "get", "defaults.lang"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn completions_mention_binary() {
    let temp = TempDir::new().unwrap();
    siteforge(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("siteforge"));
}
