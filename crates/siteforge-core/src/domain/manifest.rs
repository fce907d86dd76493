//! `package.json` model.
//!
//! The manifest is kept as an ordered JSON object so every key we do not own
//! round-trips untouched. Only `devDependencies` and `scripts` are ever
//! mutated, and both only through the merge operations below.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{DevDependency, DomainError, ScriptAlias, ScriptPolicy};

const SCRIPTS: &str = "scripts";
const DEPENDENCIES: &str = "dependencies";
const DEV_DEPENDENCIES: &str = "devDependencies";

/// Parsed project manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    root: Map<String, Value>,
}

/// What happened to one alias during a script merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptChange {
    /// Alias was absent and has been set.
    Added,
    /// Alias existed with a different value and was replaced.
    Overwritten,
    /// Alias already held the canonical value.
    Unchanged,
    /// Alias existed and its policy forbids replacing it.
    Preserved,
}

impl Manifest {
    /// Parse manifest text.
    ///
    /// Rejects anything whose shape we would have to guess about: a non-object
    /// root, or a non-object `scripts`/dependency table.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let value: Value = serde_json::from_str(text).map_err(|e| DomainError::ManifestParse {
            reason: e.to_string(),
        })?;

        let Value::Object(root) = value else {
            return Err(DomainError::ManifestShape {
                field: "<root>".into(),
                expected: "a JSON object",
            });
        };

        for field in [SCRIPTS, DEPENDENCIES, DEV_DEPENDENCIES] {
            if let Some(v) = root.get(field) {
                if !v.is_object() {
                    return Err(DomainError::ManifestShape {
                        field: field.into(),
                        expected: "an object",
                    });
                }
            }
        }

        Ok(Self { root })
    }

    /// Minimal manifest for a fresh project.
    pub fn new_default(name: &str) -> Self {
        let mut root = Map::new();
        root.insert("name".into(), Value::String(name.into()));
        root.insert("version".into(), Value::String("1.0.0".into()));
        root.insert("private".into(), Value::Bool(true));
        root.insert("description".into(), Value::String(String::new()));
        root.insert(SCRIPTS.into(), Value::Object(Map::new()));
        Self { root }
    }

    pub fn name(&self) -> Option<&str> {
        self.root.get("name").and_then(Value::as_str)
    }

    /// True if `package` appears in either dependency table.
    pub fn has_dependency(&self, package: &str) -> bool {
        [DEPENDENCIES, DEV_DEPENDENCIES].iter().any(|table| {
            self.root
                .get(*table)
                .and_then(Value::as_object)
                .is_some_and(|deps| deps.contains_key(package))
        })
    }

    /// Entries of `wanted` whose package is not yet in any dependency table,
    /// in order. Matching is by name; an existing range is never compared.
    pub fn missing_dependencies<'a>(
        &self,
        wanted: &'a [DevDependency],
    ) -> Vec<&'a DevDependency> {
        wanted
            .iter()
            .filter(|dep| !self.has_dependency(&dep.name))
            .collect()
    }

    /// Record a dev dependency unless the package is already listed.
    ///
    /// Returns `true` if the manifest changed.
    pub fn add_dev_dependency(&mut self, package: &str, range: &str) -> bool {
        if self.has_dependency(package) {
            return false;
        }
        self.table_mut(DEV_DEPENDENCIES)
            .insert(package.into(), Value::String(range.into()));
        true
    }

    pub fn script(&self, alias: &str) -> Option<&str> {
        self.root
            .get(SCRIPTS)
            .and_then(Value::as_object)
            .and_then(|s| s.get(alias))
            .and_then(Value::as_str)
    }

    /// Merge rendered aliases into `scripts`.
    ///
    /// `IfAbsent` aliases are set only when the key is missing; `Overwrite`
    /// aliases always end up holding the canonical command. Keys not named in
    /// `aliases` are never touched.
    pub fn merge_scripts<'a>(
        &mut self,
        aliases: impl IntoIterator<Item = (&'a ScriptAlias, String)>,
    ) -> Vec<(String, ScriptChange)> {
        let scripts = self.table_mut(SCRIPTS);
        let mut changes = Vec::new();

        for (alias, command) in aliases {
            let change = match (scripts.get(&alias.name), alias.policy) {
                (Some(_), ScriptPolicy::IfAbsent) => ScriptChange::Preserved,
                (Some(Value::String(current)), ScriptPolicy::Overwrite) if *current == command => {
                    ScriptChange::Unchanged
                }
                (Some(_), ScriptPolicy::Overwrite) => ScriptChange::Overwritten,
                (None, _) => ScriptChange::Added,
            };

            if matches!(change, ScriptChange::Added | ScriptChange::Overwritten) {
                scripts.insert(alias.name.clone(), Value::String(command));
            }
            changes.push((alias.name.clone(), change));
        }

        changes
    }

    /// Serialise with two-space indentation and a trailing newline, as npm does.
    pub fn to_pretty_string(&self) -> String {
        // Serialising a Map<String, Value> cannot fail.
        let mut out = serde_json::to_string_pretty(&self.root).unwrap_or_default();
        out.push('\n');
        out
    }

    fn table_mut(&mut self, field: &str) -> &mut Map<String, Value> {
        let entry = self
            .root
            .entry(field.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            // parse() rejects this shape; only reachable through new_default edits.
            *entry = Value::Object(Map::new());
        }
        match entry {
            Value::Object(map) => map,
            _ => unreachable!("table was just normalised to an object"),
        }
    }
}
