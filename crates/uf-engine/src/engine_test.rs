//! End-to-end engine tests over an in-memory target database.

use super::*;
use crate::source::StaticSource;
use crate::EngineError;
use uf_core::ScriptPolicy;

fn settings() -> EngineSettings {
    EngineSettings {
        journal_schema: "upflow".to_string(),
        journal_table: "schema_versions".to_string(),
        vars: HashMap::new(),
    }
}

fn script(name: &str, group: u32, policy: ScriptPolicy, content: &str) -> Script {
    Script::new(name.into(), group, policy, content)
}

fn engine(scripts: Vec<Script>) -> MigrationEngine<StaticSource> {
    MigrationEngine::new(
        TargetDb::open_memory().unwrap(),
        StaticSource::new(scripts),
        settings(),
    )
}

fn base_scripts() -> Vec<Script> {
    vec![
        script(
            "schemas/000001-app.sql",
            20,
            ScriptPolicy::RunOnce,
            "CREATE SCHEMA IF NOT EXISTS app;",
        ),
        script(
            "tables/000001-person.sql",
            30,
            ScriptPolicy::RunOnce,
            "CREATE TABLE app.person (id INT);",
        ),
        script(
            "views/person_v.sql",
            40,
            ScriptPolicy::RunAlways,
            "CREATE OR REPLACE VIEW app.person_v AS SELECT * FROM app.person;",
        ),
    ]
}

#[test]
fn test_apply_twice_is_idempotent() {
    let engine = engine(base_scripts());

    let first = engine
        .perform_upgrade(TransactionDiscipline::SingleTransaction)
        .unwrap();
    assert!(first.successful);
    assert_eq!(first.scripts.len(), 3);

    let second = engine
        .perform_upgrade(TransactionDiscipline::SingleTransaction)
        .unwrap();
    assert!(second.successful);
    // only the run_always view is re-selected
    let names: Vec<&str> = second.scripts.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["views/person_v.sql"]);

    // the journal holds the run_once scripts exactly once each
    let journal = Journal::new("upflow", "schema_versions");
    let entries = journal.applied_entries(engine.db().conn()).unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.contains_key("schemas/000001-app.sql"));
    assert!(entries.contains_key("tables/000001-person.sql"));
}

#[test]
fn test_run_on_change_reruns_only_when_content_changes() {
    let reference = script(
        "reference/codes.sql",
        60,
        ScriptPolicy::RunOnChange,
        "CREATE OR REPLACE TABLE codes AS SELECT 1 AS code;",
    );
    let engine1 = engine(vec![reference.clone()]);
    engine1
        .perform_upgrade(TransactionDiscipline::SingleTransaction)
        .unwrap();

    // same content: nothing to do
    let plan = engine1.scripts_to_execute().unwrap();
    assert!(plan.is_empty());

    // simulate an edit by rebuilding the engine over the same database with
    // changed content: not possible through StaticSource without a second
    // engine, so drive the planner pieces directly
    let journal = Journal::new("upflow", "schema_versions");
    let applied = journal.applied_entries(engine1.db().conn()).unwrap();
    let edited = script(
        "reference/codes.sql",
        60,
        ScriptPolicy::RunOnChange,
        "CREATE OR REPLACE TABLE codes AS SELECT 2 AS code;",
    );
    let plan = build_plan(vec![edited], &applied);
    assert_eq!(plan.names(), vec!["reference/codes.sql"]);
}

#[test]
fn test_run_on_change_refreshes_journal_checksum() {
    let v1 = script(
        "reference/codes.sql",
        60,
        ScriptPolicy::RunOnChange,
        "CREATE OR REPLACE TABLE codes AS SELECT 1 AS code;",
    );
    let v2 = script(
        "reference/codes.sql",
        60,
        ScriptPolicy::RunOnChange,
        "CREATE OR REPLACE TABLE codes AS SELECT 2 AS code;",
    );

    let db = TargetDb::open_memory().unwrap();
    let journal = Journal::new("upflow", "schema_versions");
    journal.ensure_schema(db.conn()).unwrap();

    let vars = HashMap::new();
    let coordinator = TransactionCoordinator::new(&db, &journal, &vars);
    coordinator
        .execute(vec![v1], TransactionDiscipline::SingleTransaction)
        .unwrap();
    coordinator
        .execute(vec![v2.clone()], TransactionDiscipline::SingleTransaction)
        .unwrap();

    let entries = journal.applied_entries(db.conn()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries.get("reference/codes.sql").unwrap().checksum, v2.checksum);
}

#[test]
fn test_preview_does_not_mutate_the_journal() {
    let engine = engine(base_scripts());
    engine
        .perform_upgrade(TransactionDiscipline::SingleTransaction)
        .unwrap();

    let journal = Journal::new("upflow", "schema_versions");
    let rows_before = journal.entry_count(engine.db().conn()).unwrap();

    let plan = engine.scripts_to_execute().unwrap();
    assert_eq!(plan.names(), vec!["views/person_v.sql"]);

    assert_eq!(journal.entry_count(engine.db().conn()).unwrap(), rows_before);
}

#[test]
fn test_preview_on_fresh_database_needs_no_journal_table() {
    // a preview against a database that has never been migrated must not
    // create anything
    let engine = engine(base_scripts());
    let plan = engine.scripts_to_execute().unwrap();
    assert_eq!(plan.len(), 3);

    let journal = Journal::new("upflow", "schema_versions");
    assert!(!journal.table_exists(engine.db().conn()).unwrap());
}

#[test]
fn test_write_plan_collision_leaves_first_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.sql");
    let engine = engine(base_scripts());

    engine.write_plan(&path).unwrap();
    let first_content = std::fs::read_to_string(&path).unwrap();
    assert!(first_content.contains("-- Script: schemas/000001-app.sql"));

    let err = engine.write_plan(&path).unwrap_err();
    assert!(matches!(err, EngineError::OutputTargetExists { .. }));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), first_content);
}

#[test]
fn test_status_lists_applied_and_pending() {
    let engine = engine(base_scripts());
    engine
        .perform_upgrade(TransactionDiscipline::SingleTransaction)
        .unwrap();

    let status = engine.status().unwrap();
    assert_eq!(status.len(), 3);
    // ordered by (group, name); run_once scripts applied, run_always never
    assert_eq!(status[0].0.name, "schemas/000001-app.sql");
    assert!(status[0].1);
    assert_eq!(status[1].0.name, "tables/000001-person.sql");
    assert!(status[1].1);
    assert_eq!(status[2].0.name, "views/person_v.sql");
    assert!(!status[2].1);
}

#[test]
fn test_failure_report_names_script_and_preserves_reselection() {
    let scripts = vec![
        script(
            "tables/000001-ok.sql",
            30,
            ScriptPolicy::RunOnce,
            "CREATE TABLE ok_t (id INT);",
        ),
        script(
            "tables/000002-bad.sql",
            30,
            ScriptPolicy::RunOnce,
            "INSERT INTO nonexistent VALUES (1);",
        ),
    ];
    let engine = engine(scripts);

    let report = engine
        .perform_upgrade(TransactionDiscipline::SingleTransaction)
        .unwrap();
    assert!(!report.successful);
    assert_eq!(report.error_script.as_deref(), Some("tables/000002-bad.sql"));
    assert!(report.error.as_deref().unwrap().contains("statement"));

    // everything rolled back: both scripts are selectable again
    let plan = engine.scripts_to_execute().unwrap();
    assert_eq!(
        plan.names(),
        vec!["tables/000001-ok.sql", "tables/000002-bad.sql"]
    );
}

#[test]
fn test_duplicate_names_fail_discovery() {
    let scripts = vec![
        script("tables/a.sql", 30, ScriptPolicy::RunOnce, "CREATE TABLE a (id INT);"),
        script("tables/a.sql", 40, ScriptPolicy::RunOnce, "CREATE TABLE b (id INT);"),
    ];
    let engine = engine(scripts);
    let err = engine
        .perform_upgrade(TransactionDiscipline::SingleTransaction)
        .unwrap_err();
    assert!(matches!(err, EngineError::DuplicateScript { .. }));
}
