use std::collections::HashMap;

use super::PackageManager;

/// Variables substituted into parameterized blueprint content.
///
/// Placeholders use the `{{NAME}}` form. Unknown placeholders are left in
/// place so a typo shows up in the generated file instead of vanishing.
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    /// Build the standard context for a project and package manager.
    ///
    /// Standard variables:
    ///
    /// - `PROJECT_NAME`: package name as written to `package.json`
    /// - `PROJECT_NAME_QUOTED`: the same name as a double-quoted scalar, safe
    ///   in YAML front matter (`@scope/name` cannot start a plain scalar)
    /// - `PACKAGE_MANAGER`: binary name (`npm`, `pnpm`, `yarn`)
    /// - `RUN`: prefix for running a script alias (`npm run`)
    /// - `CI_INSTALL`: reproducible install command for CI (`npm ci`)
    /// - `CI_PM_SETUP`: extra workflow steps the package manager needs
    pub fn new(project_name: impl Into<String>, package_manager: PackageManager) -> Self {
        let name = project_name.into();
        let mut vars = HashMap::new();

        vars.insert("PROJECT_NAME_QUOTED".to_string(), quoted(&name));
        vars.insert("PROJECT_NAME".to_string(), name);
        vars.insert(
            "PACKAGE_MANAGER".to_string(),
            package_manager.program().to_string(),
        );
        vars.insert("RUN".to_string(), package_manager.run_prefix().to_string());
        vars.insert(
            "CI_INSTALL".to_string(),
            package_manager.ci_install().to_string(),
        );
        vars.insert(
            "CI_PM_SETUP".to_string(),
            package_manager.ci_setup_steps().to_string(),
        );

        Self { variables: vars }
    }

    /// Render a template string by replacing `{{VARIABLE}}` placeholders.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let key = &after[..end];
                    match self.variables.get(key) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push_str("{{");
                            out.push_str(key);
                            out.push_str("}}");
                        }
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// JSON string literal for `value`. Every JSON string is also a valid YAML
/// double-quoted scalar.
fn quoted(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Normalise a directory name into a valid npm package name.
///
/// Lowercases, maps anything outside `[a-z0-9._-]` to `-`, collapses runs of
/// `-`, and strips leading `.`/`_`/`-`. Falls back to `site` when nothing
/// usable is left.
pub fn package_name_from(raw: &str) -> String {
    let mut name = String::with_capacity(raw.len());
    for ch in raw.trim().chars() {
        let ch = ch.to_ascii_lowercase();
        let mapped = if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
            ch
        } else {
            '-'
        };
        if mapped == '-' && name.ends_with('-') {
            continue;
        }
        name.push(mapped);
    }

    let trimmed = name
        .trim_start_matches(['.', '_', '-'])
        .trim_end_matches('-');
    if trimmed.is_empty() {
        "site".to_string()
    } else {
        // npm caps names at 214 characters.
        trimmed.chars().take(214).collect()
    }
}
