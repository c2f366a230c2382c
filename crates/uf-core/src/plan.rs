//! Ordered execution plan for a single invocation.

use crate::script::Script;
use serde::Serialize;

/// The ordered sequence of scripts selected for one invocation.
///
/// Ordering is a stable sort by (run-group ascending, name ascending within a
/// group) and is established at construction, so every consumer observes the
/// same order.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionPlan {
    scripts: Vec<Script>,
}

impl ExecutionPlan {
    /// Build a plan from selected scripts, sorting them into execution order.
    pub fn new(mut scripts: Vec<Script>) -> Self {
        scripts.sort_by(|a, b| a.group.cmp(&b.group).then_with(|| a.name.cmp(&b.name)));
        Self { scripts }
    }

    /// Scripts in execution order.
    pub fn scripts(&self) -> &[Script] {
        &self.scripts
    }

    /// Consume the plan, yielding scripts in execution order.
    pub fn into_scripts(self) -> Vec<Script> {
        self.scripts
    }

    /// Number of scripts in the plan.
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    /// True when nothing is selected (a no-op invocation).
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Script names in execution order (for reporting).
    pub fn names(&self) -> Vec<&str> {
        self.scripts.iter().map(|s| s.name.as_str()).collect()
    }
}
