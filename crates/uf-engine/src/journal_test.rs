//! Tests for journal creation, reads, and upserts.

use super::*;
use uf_core::ScriptPolicy;
use uf_db::TargetDb;

fn journal() -> Journal {
    Journal::new("upflow", "schema_versions")
}

fn script(name: &str, content: &str) -> Script {
    Script::new(name.into(), 30, ScriptPolicy::RunOnce, content)
}

#[test]
fn test_ensure_schema_is_idempotent() {
    let db = TargetDb::open_memory().unwrap();
    let journal = journal();

    journal.ensure_schema(db.conn()).unwrap();
    journal.ensure_schema(db.conn()).unwrap();

    assert!(journal.table_exists(db.conn()).unwrap());
    assert_eq!(journal.entry_count(db.conn()).unwrap(), 0);
}

#[test]
fn test_missing_table_reads_as_empty() {
    let db = TargetDb::open_memory().unwrap();
    let journal = journal();

    assert!(!journal.table_exists(db.conn()).unwrap());
    assert!(journal.applied_entries(db.conn()).unwrap().is_empty());
    assert_eq!(journal.entry_count(db.conn()).unwrap(), 0);
}

#[test]
fn test_record_and_read_back() {
    let db = TargetDb::open_memory().unwrap();
    let journal = journal();
    journal.ensure_schema(db.conn()).unwrap();

    let s = script("tables/000001-person.sql", "CREATE TABLE person (id INT);");
    let applied_at = Utc::now();
    journal.record(db.conn(), &s, applied_at).unwrap();

    let entries = journal.applied_entries(db.conn()).unwrap();
    assert_eq!(entries.len(), 1);
    let entry = entries.get("tables/000001-person.sql").unwrap();
    assert_eq!(entry.checksum, s.checksum);
    // microsecond precision survives the TIMESTAMP round trip
    assert_eq!(
        entry.applied_at.timestamp_micros(),
        applied_at.timestamp_micros()
    );
}

#[test]
fn test_record_upserts_on_conflict() {
    let db = TargetDb::open_memory().unwrap();
    let journal = journal();
    journal.ensure_schema(db.conn()).unwrap();

    let v1 = script("views/person_v.sql", "CREATE VIEW person_v AS SELECT 1;");
    journal.record(db.conn(), &v1, Utc::now()).unwrap();

    let v2 = script("views/person_v.sql", "CREATE VIEW person_v AS SELECT 2;");
    journal.record(db.conn(), &v2, Utc::now()).unwrap();

    let entries = journal.applied_entries(db.conn()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries.get("views/person_v.sql").unwrap().checksum, v2.checksum);
}

#[test]
fn test_quoted_identifiers_allow_awkward_names() {
    let db = TargetDb::open_memory().unwrap();
    let journal = Journal::new("my schema", "version table");

    journal.ensure_schema(db.conn()).unwrap();
    let s = script("a.sql", "SELECT 1;");
    journal.record(db.conn(), &s, Utc::now()).unwrap();

    assert_eq!(journal.entry_count(db.conn()).unwrap(), 1);
}

#[test]
fn test_parse_timestamp_handles_missing_fraction() {
    let parsed = parse_timestamp("2026-01-02 03:04:05").unwrap();
    assert_eq!(parsed.timestamp_subsec_micros(), 0);
    let with_fraction = parse_timestamp("2026-01-02 03:04:05.123456").unwrap();
    assert!(with_fraction > parsed);
    assert!(parse_timestamp("not a timestamp").is_err());
}
