//! Script sources: enumerate candidate migration scripts.
//!
//! A source yields (name, group, policy, content) tuples and must be
//! deterministic given the same underlying collection. Grouping and policy
//! come from caller-supplied classification rules, not from the engine core.

use crate::error::{EngineError, EngineResult};
use glob::glob;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use uf_core::config::GroupRule;
use uf_core::{Config, Script, ScriptName};

/// A provider of migration scripts.
pub trait ScriptSource {
    /// Enumerate all candidate scripts.
    ///
    /// Must be deterministic and fail with [`EngineError::DuplicateScript`]
    /// when two scripts resolve to the same name.
    fn discover(&self) -> EngineResult<Vec<Script>>;
}

/// Fail if any script name occurs twice in `scripts`.
fn check_duplicates(scripts: &[Script]) -> EngineResult<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for script in scripts {
        if !seen.insert(script.name.as_str()) {
            return Err(EngineError::DuplicateScript {
                name: script.name.to_string(),
            });
        }
    }
    Ok(())
}

/// An in-memory script collection.
///
/// Serves embedded script tables (`include_str!` arrays) and tests; the
/// caller constructs the scripts, this source only validates identity.
pub struct StaticSource {
    scripts: Vec<Script>,
}

impl StaticSource {
    pub fn new(scripts: Vec<Script>) -> Self {
        Self { scripts }
    }
}

impl ScriptSource for StaticSource {
    fn discover(&self) -> EngineResult<Vec<Script>> {
        check_duplicates(&self.scripts)?;
        Ok(self.scripts.clone())
    }
}

/// Filesystem script source.
///
/// Enumerates `<root>/<subdir>/**/*.sql` for each classification rule and
/// names scripts by their path relative to the root, always `/`-separated so
/// names are stable across platforms.
pub struct DirectorySource {
    root: PathBuf,
    rules: Vec<GroupRule>,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>, rules: Vec<GroupRule>) -> Self {
        Self {
            root: root.into(),
            rules,
        }
    }

    /// Build a source from a loaded project config.
    pub fn from_config(project_root: &Path, config: &Config) -> Self {
        Self::new(
            config.script_dir_absolute(project_root),
            config.groups.clone(),
        )
    }

    /// Script name: path relative to the source root, `/`-separated.
    fn script_name(&self, path: &Path) -> EngineResult<ScriptName> {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let mut parts = Vec::new();
        for component in relative.components() {
            match component.as_os_str().to_str() {
                Some(s) => parts.push(s),
                None => {
                    return Err(EngineError::Discovery {
                        message: format!("script path is not valid UTF-8: {}", path.display()),
                    })
                }
            }
        }
        ScriptName::try_new(parts.join("/")).ok_or_else(|| EngineError::Discovery {
            message: format!("script path yields an empty name: {}", path.display()),
        })
    }

    /// Sorted `.sql` files under one rule's subdirectory.
    fn rule_paths(&self, rule: &GroupRule) -> EngineResult<Vec<PathBuf>> {
        let pattern = format!("{}/**/*.sql", self.root.join(&rule.subdir).display());
        let entries = glob(&pattern).map_err(|e| EngineError::Discovery {
            message: format!("invalid glob pattern '{pattern}': {e}"),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| EngineError::Discovery {
                message: format!("cannot access script: {e}"),
            })?;
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

impl ScriptSource for DirectorySource {
    fn discover(&self) -> EngineResult<Vec<Script>> {
        let mut scripts = Vec::new();
        for rule in &self.rules {
            for path in self.rule_paths(rule)? {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| EngineError::Discovery {
                        message: format!("cannot read {}: {e}", path.display()),
                    })?;
                let name = self.script_name(&path)?;
                log::debug!("discovered {} (group {}, {})", name, rule.order, rule.policy);
                scripts.push(Script::new(name, rule.order, rule.policy, content));
            }
        }
        check_duplicates(&scripts)?;
        Ok(scripts)
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
