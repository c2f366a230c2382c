//! Engine facade: ties source, journal, planner, coordinator, and preview
//! together behind a small entry point.

use crate::coordinator::{TransactionCoordinator, TransactionDiscipline};
use crate::error::EngineResult;
use crate::journal::Journal;
use crate::planner::{build_plan, is_applied};
use crate::preview;
use crate::source::ScriptSource;
use std::collections::HashMap;
use std::path::Path;
use uf_core::{Config, ExecutionPlan, Script, UpgradeReport};
use uf_db::TargetDb;

/// Engine configuration, passed by value into [`MigrationEngine::new`].
///
/// A plain record with named fields; no builder.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Schema holding the journal table
    pub journal_schema: String,
    /// Journal table name
    pub journal_table: String,
    /// Variables substituted into script bodies
    pub vars: HashMap<String, String>,
}

impl EngineSettings {
    /// Lift the engine-relevant parts out of a loaded project config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            journal_schema: config.journal.schema.clone(),
            journal_table: config.journal.table.clone(),
            vars: config.vars.clone(),
        }
    }
}

/// The migration engine for one target database.
///
/// Single-threaded and synchronous: each invocation starts from a cold
/// discovery and a fresh journal read, and the connection is released when
/// the engine drops.
pub struct MigrationEngine<S: ScriptSource> {
    db: TargetDb,
    source: S,
    journal: Journal,
    vars: HashMap<String, String>,
}

impl<S: ScriptSource> MigrationEngine<S> {
    pub fn new(db: TargetDb, source: S, settings: EngineSettings) -> Self {
        let journal = Journal::new(settings.journal_schema, settings.journal_table);
        Self {
            db,
            source,
            journal,
            vars: settings.vars,
        }
    }

    /// Discover, plan, and execute under the given discipline.
    ///
    /// Script failures are carried inside the returned report (success flag,
    /// failing script, error); fatal setup failures are `Err`.
    pub fn perform_upgrade(
        &self,
        discipline: TransactionDiscipline,
    ) -> EngineResult<UpgradeReport> {
        let scripts = self.source.discover()?;
        self.journal.ensure_schema(self.db.conn())?;
        let coordinator = TransactionCoordinator::new(&self.db, &self.journal, &self.vars);
        coordinator.execute(scripts, discipline)
    }

    /// Compute the plan that `perform_upgrade` would execute, without
    /// executing or journaling anything.
    pub fn scripts_to_execute(&self) -> EngineResult<ExecutionPlan> {
        let scripts = self.source.discover()?;
        let applied = self.journal.applied_entries(self.db.conn())?;
        Ok(build_plan(scripts, &applied))
    }

    /// Serialize the computed plan to `path` (plan/preview mode).
    ///
    /// Bypasses the coordinator and journal writes entirely; fails with
    /// [`crate::EngineError::OutputTargetExists`] when the destination
    /// already exists.
    pub fn write_plan(&self, path: &Path) -> EngineResult<ExecutionPlan> {
        let plan = self.scripts_to_execute()?;
        preview::write_plan(&plan, path)?;
        Ok(plan)
    }

    /// Every discovered script paired with its applied state.
    pub fn status(&self) -> EngineResult<Vec<(Script, bool)>> {
        let scripts = self.source.discover()?;
        let applied = self.journal.applied_entries(self.db.conn())?;

        let mut status_list = Vec::with_capacity(scripts.len());
        for script in scripts {
            let applied_flag = is_applied(&script, &applied);
            status_list.push((script, applied_flag));
        }
        status_list.sort_by(|a, b| a.0.group.cmp(&b.0.group).then_with(|| a.0.name.cmp(&b.0.name)));
        Ok(status_list)
    }

    /// Borrow the underlying target database.
    pub fn db(&self) -> &TargetDb {
        &self.db
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
