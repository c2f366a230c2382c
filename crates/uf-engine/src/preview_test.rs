//! Tests for plan serialization and exclusive-create semantics.

use super::*;
use uf_core::{Script, ScriptPolicy};

fn plan() -> ExecutionPlan {
    ExecutionPlan::new(vec![
        Script::new(
            "tables/000001-person.sql".into(),
            30,
            ScriptPolicy::RunOnce,
            "CREATE TABLE person (id INT);",
        ),
        Script::new(
            "views/person_v.sql".into(),
            40,
            ScriptPolicy::RunAlways,
            "CREATE OR REPLACE VIEW person_v AS\nSELECT * FROM person;",
        ),
    ])
}

#[test]
fn test_output_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.sql");

    write_plan(&plan(), &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "-- Script: tables/000001-person.sql\n\
         CREATE TABLE person (id INT);\n\
         \n\
         -- Script: views/person_v.sql\n\
         CREATE OR REPLACE VIEW person_v AS\n\
         SELECT * FROM person;\n\
         \n"
    );
}

#[test]
fn test_empty_plan_writes_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.sql");

    write_plan(&ExecutionPlan::new(Vec::new()), &path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_existing_destination_is_rejected_and_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.sql");
    std::fs::write(&path, "original content").unwrap();

    let err = write_plan(&plan(), &path).unwrap_err();
    assert!(matches!(err, EngineError::OutputTargetExists { .. }));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "original content");
}

#[test]
fn test_unwritable_destination_is_an_output_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_subdir").join("plan.sql");

    let err = write_plan(&plan(), &path).unwrap_err();
    assert!(matches!(err, EngineError::OutputWrite { .. }));
}
