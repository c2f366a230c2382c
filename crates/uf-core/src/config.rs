//! Configuration types and parsing for upflow.yml

use crate::error::{CoreError, CoreResult};
use crate::script::ScriptPolicy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Main project configuration from upflow.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Target database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Journal table location inside the target database
    #[serde(default)]
    pub journal: JournalConfig,

    /// Directory containing the group subdirectories of migration scripts
    #[serde(default = "default_script_dir")]
    pub script_dir: String,

    /// Ordered classification rules mapping script subdirectories to
    /// run-groups and execution policies
    #[serde(default = "default_groups")]
    pub groups: Vec<GroupRule>,

    /// Variables substituted into script bodies as `$name$` placeholders
    #[serde(default)]
    pub vars: HashMap<String, String>,
}

/// Target database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database path (file-based or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Journal table location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Schema holding the journal table
    #[serde(default = "default_journal_schema")]
    pub schema: String,

    /// Journal table name
    #[serde(default = "default_journal_table")]
    pub table: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            schema: default_journal_schema(),
            table: default_journal_table(),
        }
    }
}

/// One script classification rule: every `.sql` file under
/// `<script_dir>/<subdir>` belongs to run-group `order` with the given policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupRule {
    /// Subdirectory under `script_dir`
    pub subdir: String,

    /// Run-group ordinal; lower runs first
    pub order: u32,

    /// Execution policy for scripts in this group
    #[serde(default)]
    pub policy: ScriptPolicy,
}

fn default_db_path() -> String {
    "target/app.duckdb".to_string()
}

fn default_journal_schema() -> String {
    "upflow".to_string()
}

fn default_journal_table() -> String {
    "schema_versions".to_string()
}

fn default_script_dir() -> String {
    "scripts".to_string()
}

/// Default group layout: deployment hooks around schemas, tables, and the
/// always-replayed view/function definitions.
fn default_groups() -> Vec<GroupRule> {
    let rule = |subdir: &str, order: u32, policy: ScriptPolicy| GroupRule {
        subdir: subdir.to_string(),
        order,
        policy,
    };
    vec![
        rule("pre_deployment", 10, ScriptPolicy::RunOnce),
        rule("schemas", 20, ScriptPolicy::RunOnce),
        rule("tables", 30, ScriptPolicy::RunOnce),
        rule("views", 40, ScriptPolicy::RunAlways),
        rule("functions", 50, ScriptPolicy::RunAlways),
        rule("post_deployment", 70, ScriptPolicy::RunOnce),
    ]
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for upflow.yml or upflow.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("upflow.yml");
        let yaml_path = dir.join("upflow.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: dir.join("upflow.yml").display().to_string(),
            })
        }
    }

    /// Validate the configuration
    ///
    /// Runs before any database contact so bad settings fail fast.
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        if self.database.path.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path cannot be empty".to_string(),
            });
        }

        if self.journal.schema.is_empty() || self.journal.table.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "journal.schema and journal.table cannot be empty".to_string(),
            });
        }

        if self.groups.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "At least one group rule must be specified".to_string(),
            });
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for rule in &self.groups {
            if rule.subdir.is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: "Group subdir cannot be empty".to_string(),
                });
            }
            if !seen.insert(rule.subdir.as_str()) {
                return Err(CoreError::ConfigInvalid {
                    message: format!("Duplicate group subdir: {}", rule.subdir),
                });
            }
        }

        Ok(())
    }

    /// Absolute script directory, resolved against a project root
    pub fn script_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.script_dir)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
