//! Migration script type and execution policies.

use crate::checksum::compute_checksum;
use crate::script_name::ScriptName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution policy for a migration script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScriptPolicy {
    /// Execute exactly once ever; journaled on success (default)
    #[default]
    RunOnce,
    /// Execute on every invocation; never journaled
    RunAlways,
    /// Execute once per distinct content version; journal checksum is
    /// refreshed when the content changes
    RunOnChange,
}

impl fmt::Display for ScriptPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptPolicy::RunOnce => write!(f, "run_once"),
            ScriptPolicy::RunAlways => write!(f, "run_always"),
            ScriptPolicy::RunOnChange => write!(f, "run_on_change"),
        }
    }
}

/// A discovered migration script.
///
/// Immutable once discovered for a given invocation. The checksum is computed
/// from the raw content at construction and is what the journal stores for
/// `run_on_change` detection.
#[derive(Debug, Clone, Serialize)]
pub struct Script {
    /// Unique script name
    pub name: ScriptName,

    /// Run-group ordinal; lower groups run first
    pub group: u32,

    /// Execution policy
    pub policy: ScriptPolicy,

    /// Raw SQL content, before variable substitution
    pub content: String,

    /// SHA-256 checksum of the raw content
    pub checksum: String,
}

impl Script {
    /// Create a script, computing its content checksum.
    pub fn new(
        name: ScriptName,
        group: u32,
        policy: ScriptPolicy,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let checksum = compute_checksum(&content);
        Self {
            name,
            group,
            policy,
            content,
            checksum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_computed_from_content() {
        let a = Script::new("a.sql".into(), 10, ScriptPolicy::RunOnce, "SELECT 1");
        let b = Script::new("b.sql".into(), 10, ScriptPolicy::RunOnce, "SELECT 1");
        let c = Script::new("c.sql".into(), 10, ScriptPolicy::RunOnce, "SELECT 2");
        assert_eq!(a.checksum, b.checksum);
        assert_ne!(a.checksum, c.checksum);
    }

    #[test]
    fn test_policy_serde_names() {
        assert_eq!(
            serde_yaml::from_str::<ScriptPolicy>("run_always").unwrap(),
            ScriptPolicy::RunAlways
        );
        assert_eq!(
            serde_yaml::from_str::<ScriptPolicy>("run_on_change").unwrap(),
            ScriptPolicy::RunOnChange
        );
    }
}
