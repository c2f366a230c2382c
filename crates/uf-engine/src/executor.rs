//! Script executor: run one script's statement batches on a live connection.

use crate::error::{EngineError, EngineResult};
use duckdb::Connection;
use std::collections::HashMap;
use uf_core::sql_utils::split_statements;
use uf_core::Script;
use uf_db::DbError;

/// Substitute `$name$` placeholders with configured variable values.
///
/// Only configured variables are replaced; unknown placeholders pass through
/// untouched. Substitution happens at execution time, so checksums always
/// reflect the raw authored content.
pub fn substitute_vars(content: &str, vars: &HashMap<String, String>) -> String {
    let mut rendered = content.to_string();
    for (name, value) in vars {
        rendered = rendered.replace(&format!("${name}$"), value);
    }
    rendered
}

/// Execute one script within the current transactional scope.
///
/// The body is variable-substituted, split into statement batches, and the
/// batches run sequentially. Returns one captured diagnostic line per batch
/// (the rows-affected count, the only informational channel the driver
/// exposes). The first failing batch aborts the script; later batches are
/// not attempted.
pub fn run_script(
    conn: &Connection,
    script: &Script,
    vars: &HashMap<String, String>,
) -> EngineResult<Vec<String>> {
    let rendered = substitute_vars(&script.content, vars);
    let statements = split_statements(&rendered);

    let mut output = Vec::with_capacity(statements.len());
    for (index, statement) in statements.iter().enumerate() {
        match conn.execute(statement, []) {
            Ok(rows) => {
                log::debug!("{} statement {}: {} row(s)", script.name, index + 1, rows);
                output.push(format!("statement {}: {} row(s) affected", index + 1, rows));
            }
            Err(e) => {
                return Err(EngineError::ScriptExecution {
                    script: script.name.to_string(),
                    statement_index: index,
                    source: DbError::ExecutionError(e.to_string()),
                });
            }
        }
    }
    Ok(output)
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
