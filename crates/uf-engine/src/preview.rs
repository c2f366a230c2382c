//! Plan/preview output: serialize a computed plan without executing it.

use crate::error::{EngineError, EngineResult};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use uf_core::ExecutionPlan;

/// Write the plan to `path`: per script a `-- Script: <name>` header line,
/// the verbatim content, and a blank-line separator.
///
/// The destination is opened with exclusive-create semantics: an existing
/// file fails with [`EngineError::OutputTargetExists`] and is left untouched,
/// so a prior run's output is never overwritten or extended.
pub fn write_plan(plan: &ExecutionPlan, path: &Path) -> EngineResult<()> {
    let write_err = |source: std::io::Error| EngineError::OutputWrite {
        path: path.display().to_string(),
        source,
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                EngineError::OutputTargetExists {
                    path: path.display().to_string(),
                }
            } else {
                write_err(e)
            }
        })?;

    for script in plan.scripts() {
        writeln!(file, "-- Script: {}", script.name).map_err(write_err)?;
        writeln!(file, "{}", script.content).map_err(write_err)?;
        writeln!(file).map_err(write_err)?;
    }
    file.flush().map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
#[path = "preview_test.rs"]
mod tests;
