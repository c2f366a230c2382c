//! Execution planner: merge discovered scripts with journal state.
//!
//! Deterministic and side-effect-free. The preview path calls exactly
//! [`build_plan`] and nothing else, which is what guarantees its
//! no-mutation semantics.

use crate::journal::JournalEntry;
use std::collections::HashMap;
use uf_core::{ExecutionPlan, Script, ScriptPolicy};

/// Policy-dependent applied check.
///
/// - `run_once`: applied when a journal entry exists for the name
/// - `run_on_change`: applied when an entry exists AND its checksum matches
///   the current content (a changed script reads as not-applied, triggering a
///   re-run and checksum refresh)
/// - `run_always`: never applied; selected on every invocation
pub fn is_applied(script: &Script, applied: &HashMap<String, JournalEntry>) -> bool {
    match script.policy {
        ScriptPolicy::RunAlways => false,
        ScriptPolicy::RunOnce => applied.contains_key(script.name.as_str()),
        ScriptPolicy::RunOnChange => applied
            .get(script.name.as_str())
            .is_some_and(|entry| entry.checksum == script.checksum),
    }
}

/// Build the ordered plan for this invocation.
///
/// Filters out applied scripts, then orders the remainder by (run-group,
/// name) ascending. An empty input yields an empty plan (a no-op invocation,
/// reported as success).
pub fn build_plan(scripts: Vec<Script>, applied: &HashMap<String, JournalEntry>) -> ExecutionPlan {
    let pending: Vec<Script> = scripts
        .into_iter()
        .filter(|script| !is_applied(script, applied))
        .collect();
    ExecutionPlan::new(pending)
}

#[cfg(test)]
#[path = "planner_test.rs"]
mod tests;
