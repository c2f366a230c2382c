//! Tests for plan construction and the policy-dependent applied filter.

use super::*;
use chrono::Utc;

fn script(name: &str, group: u32, policy: ScriptPolicy) -> Script {
    Script::new(name.into(), group, policy, format!("-- {name}\nSELECT 1;"))
}

fn entry_for(script: &Script) -> (String, JournalEntry) {
    (
        script.name.to_string(),
        JournalEntry {
            script_name: script.name.to_string(),
            applied_at: Utc::now(),
            checksum: script.checksum.clone(),
        },
    )
}

#[test]
fn test_plan_orders_group_then_name() {
    let scripts = vec![
        script("b", 30, ScriptPolicy::RunOnce),
        script("a", 10, ScriptPolicy::RunOnce),
        script("c", 10, ScriptPolicy::RunOnce),
    ];
    let plan = build_plan(scripts, &HashMap::new());
    assert_eq!(plan.names(), vec!["a", "c", "b"]);
}

#[test]
fn test_run_once_with_entry_is_excluded() {
    let applied_script = script("tables/a.sql", 30, ScriptPolicy::RunOnce);
    let pending_script = script("tables/b.sql", 30, ScriptPolicy::RunOnce);
    let applied: HashMap<_, _> = [entry_for(&applied_script)].into_iter().collect();

    let plan = build_plan(vec![applied_script, pending_script], &applied);
    assert_eq!(plan.names(), vec!["tables/b.sql"]);
}

#[test]
fn test_run_always_is_selected_regardless_of_journal() {
    let view = script("views/v.sql", 40, ScriptPolicy::RunAlways);
    // even a matching journal entry does not exclude it
    let applied: HashMap<_, _> = [entry_for(&view)].into_iter().collect();

    let plan = build_plan(vec![view], &applied);
    assert_eq!(plan.names(), vec!["views/v.sql"]);
}

#[test]
fn test_run_on_change_matching_checksum_is_excluded() {
    let s = script("ref/data.sql", 50, ScriptPolicy::RunOnChange);
    let applied: HashMap<_, _> = [entry_for(&s)].into_iter().collect();

    let plan = build_plan(vec![s], &applied);
    assert!(plan.is_empty());
}

#[test]
fn test_run_on_change_changed_content_is_reselected() {
    let old = script("ref/data.sql", 50, ScriptPolicy::RunOnChange);
    let applied: HashMap<_, _> = [entry_for(&old)].into_iter().collect();

    let new = Script::new(
        "ref/data.sql".into(),
        50,
        ScriptPolicy::RunOnChange,
        "-- edited\nSELECT 2;",
    );
    let plan = build_plan(vec![new], &applied);
    assert_eq!(plan.names(), vec!["ref/data.sql"]);
}

#[test]
fn test_empty_input_yields_empty_plan() {
    let plan = build_plan(Vec::new(), &HashMap::new());
    assert!(plan.is_empty());
}

#[test]
fn test_planner_does_not_consult_journal_for_unknown_names() {
    let s = script("tables/new.sql", 30, ScriptPolicy::RunOnce);
    let other = script("tables/other.sql", 30, ScriptPolicy::RunOnce);
    let applied: HashMap<_, _> = [entry_for(&other)].into_iter().collect();

    assert!(!is_applied(&s, &applied));
}
