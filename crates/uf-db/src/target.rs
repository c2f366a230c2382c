//! Target database connection wrapper.
//!
//! [`TargetDb`] owns a DuckDB [`Connection`] to the database being migrated
//! and provides opening helpers plus the BEGIN/COMMIT/ROLLBACK primitives the
//! transaction disciplines are assembled from.

use crate::error::{DbError, DbResult};
use duckdb::Connection;
use std::path::Path;

/// Wrapper around a DuckDB connection to the migration target.
///
/// Single-threaded; the connection is acquired at invocation start and
/// released when the wrapper drops, on every exit path.
pub struct TargetDb {
    conn: Connection,
}

impl TargetDb {
    /// Open (or create) the target database at `path`.
    pub fn open(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self { conn })
    }

    /// Open an in-memory target database.
    ///
    /// Useful for unit tests and dry-running scripts without a file.
    pub fn open_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Open from a path string (handles the `:memory:` special case).
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::open_memory()
        } else {
            Self::open(Path::new(path))
        }
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Execute one or more SQL statements outside any explicit transaction.
    pub fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    /// Begin an explicit transaction.
    pub fn begin(&self) -> DbResult<()> {
        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))
    }

    /// Commit the current transaction.
    pub fn commit(&self) -> DbResult<()> {
        self.conn
            .execute_batch("COMMIT")
            .map_err(|e| DbError::TransactionError(format!("COMMIT failed: {e}")))
    }

    /// Roll back the current transaction.
    pub fn rollback(&self) -> DbResult<()> {
        self.conn
            .execute_batch("ROLLBACK")
            .map_err(|e| DbError::TransactionError(format!("ROLLBACK failed: {e}")))
    }

    /// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
    /// error.
    ///
    /// Generic over the caller's error type so engine-level errors flow
    /// through unchanged.
    pub fn transaction<T, E, F>(&self, body: F) -> Result<T, E>
    where
        E: From<DbError>,
        F: FnOnce(&Connection) -> Result<T, E>,
    {
        self.begin()?;

        let result = body(&self.conn);

        match &result {
            Ok(_) => {
                if let Err(commit_err) = self.commit() {
                    let _ = self.rollback();
                    return Err(E::from(commit_err));
                }
            }
            Err(_) => {
                let _ = self.rollback();
            }
        }
        result
    }
}

#[cfg(test)]
#[path = "target_test.rs"]
mod tests;
