//! Journal of applied scripts, stored inside the target database.
//!
//! One row per applied script: name (unique), applied timestamp, and content
//! checksum. The journal is the single source of truth for "already applied"
//! state; it lives in the target database so migration history survives
//! engine restarts and is visible to any client with database access.

use crate::error::{EngineError, EngineResult};
use chrono::{DateTime, NaiveDateTime, Utc};
use duckdb::Connection;
use std::collections::HashMap;
use uf_core::sql_utils::{quote_ident, quote_qualified};
use uf_core::Script;

/// Timestamp format stored in the journal (DuckDB TIMESTAMP text form).
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One journal row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    /// Script name (unique)
    pub script_name: String,
    /// When the script was applied
    pub applied_at: DateTime<Utc>,
    /// Content checksum at time of application
    pub checksum: String,
}

/// Accessor for the journal table at a configured (schema, table) location.
pub struct Journal {
    schema: String,
    table: String,
}

impl Journal {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
        }
    }

    fn qualified_table(&self) -> String {
        quote_qualified(&self.schema, &self.table)
    }

    /// Idempotently create the journal schema and table.
    ///
    /// Never errors when they already exist; connectivity or privilege
    /// failures surface as [`EngineError::JournalInit`].
    pub fn ensure_schema(&self, conn: &Connection) -> EngineResult<()> {
        let ddl = format!(
            "CREATE SCHEMA IF NOT EXISTS {schema};\n\
             CREATE TABLE IF NOT EXISTS {table} (\n    \
                 script_name VARCHAR PRIMARY KEY,\n    \
                 applied_at TIMESTAMP NOT NULL,\n    \
                 checksum VARCHAR NOT NULL\n\
             );",
            schema = quote_ident(&self.schema),
            table = self.qualified_table(),
        );
        conn.execute_batch(&ddl).map_err(|e| EngineError::JournalInit {
            message: format!("failed to create journal table: {e}"),
        })
    }

    /// True when the journal table exists in the target database.
    pub fn table_exists(&self, conn: &Connection) -> EngineResult<bool> {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM information_schema.tables \
                 WHERE table_schema = ? AND table_name = ?",
                duckdb::params![self.schema, self.table],
                |row| row.get(0),
            )
            .map_err(|e| EngineError::JournalInit {
                message: format!("failed to probe journal table: {e}"),
            })?;
        Ok(count > 0)
    }

    /// All journal entries, keyed by script name.
    ///
    /// Under a transactional discipline this read happens inside the same
    /// transaction as plan execution, so the applied-set stays consistent
    /// with the eventual journal writes. An absent journal table reads as
    /// empty (nothing applied yet) so preview mode never has to create it.
    pub fn applied_entries(&self, conn: &Connection) -> EngineResult<HashMap<String, JournalEntry>> {
        if !self.table_exists(conn)? {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT script_name, applied_at::VARCHAR, checksum FROM {}",
            self.qualified_table()
        );
        let mut stmt = conn.prepare(&sql).map_err(|e| EngineError::JournalInit {
            message: format!("failed to read journal: {e}"),
        })?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .map_err(|e| EngineError::JournalInit {
                message: format!("failed to read journal: {e}"),
            })?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| EngineError::JournalInit {
                message: format!("failed to read journal row: {e}"),
            })?;

        let mut entries = HashMap::with_capacity(rows.len());
        for (script_name, applied_at, checksum) in rows {
            let applied_at = parse_timestamp(&applied_at)?;
            entries.insert(
                script_name.clone(),
                JournalEntry {
                    script_name,
                    applied_at,
                    checksum,
                },
            );
        }
        Ok(entries)
    }

    /// Upsert a journal entry for a successfully executed script.
    ///
    /// Called only after the script's final statement succeeded. The upsert
    /// lets a `run_on_change` re-run refresh its checksum and timestamp.
    pub fn record(
        &self,
        conn: &Connection,
        script: &Script,
        applied_at: DateTime<Utc>,
    ) -> EngineResult<()> {
        let sql = format!(
            "INSERT INTO {} (script_name, applied_at, checksum) \
             VALUES (?, CAST(? AS TIMESTAMP), ?) \
             ON CONFLICT (script_name) DO UPDATE SET \
                 applied_at = excluded.applied_at, \
                 checksum = excluded.checksum",
            self.qualified_table()
        );
        conn.execute(
            &sql,
            duckdb::params![
                script.name.as_str(),
                applied_at.format(TIMESTAMP_FORMAT).to_string(),
                script.checksum,
            ],
        )
        .map_err(|e| EngineError::Db(uf_db::DbError::ExecutionError(format!(
            "failed to record '{}' in journal: {e}",
            script.name
        ))))?;
        log::debug!("journaled {}", script.name);
        Ok(())
    }

    /// Number of journal rows (used by tests and the status listing).
    pub fn entry_count(&self, conn: &Connection) -> EngineResult<i64> {
        if !self.table_exists(conn)? {
            return Ok(0);
        }
        conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", self.qualified_table()),
            [],
            |row| row.get(0),
        )
        .map_err(|e| EngineError::JournalInit {
            message: format!("failed to count journal rows: {e}"),
        })
    }
}

fn parse_timestamp(s: &str) -> EngineResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| EngineError::JournalInit {
            message: format!("bad applied_at value '{s}': {e}"),
        })
}

#[cfg(test)]
#[path = "journal_test.rs"]
mod tests;
