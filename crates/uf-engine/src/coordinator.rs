//! Transaction coordinator: wrap plan execution in a transactional discipline.

use crate::error::{EngineError, EngineResult};
use crate::executor::run_script;
use crate::journal::Journal;
use crate::planner::build_plan;
use chrono::Utc;
use duckdb::Connection;
use std::collections::HashMap;
use std::time::Instant;
use uf_core::{Script, ScriptPolicy, UpgradeReport};
use uf_db::TargetDb;

/// How plan execution is wrapped in transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionDiscipline {
    /// One transaction for the whole plan; any failure rolls back everything,
    /// including journal writes for earlier scripts in this invocation
    SingleTransaction,
    /// One transaction per script; earlier successes stay committed when a
    /// later script fails
    PerScript,
    /// Autocommit; for targets that cannot run DDL inside a transaction
    NoTransaction,
    /// Like `SingleTransaction` but the final decision is always rollback;
    /// validates that scripts execute cleanly without committing anything
    DryRun,
}

impl std::fmt::Display for TransactionDiscipline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionDiscipline::SingleTransaction => write!(f, "single-transaction"),
            TransactionDiscipline::PerScript => write!(f, "per-script"),
            TransactionDiscipline::NoTransaction => write!(f, "no-transaction"),
            TransactionDiscipline::DryRun => write!(f, "dry-run"),
        }
    }
}

/// Drives a plan through the journal, executor, and the selected discipline.
///
/// Scripts run strictly sequentially. On the first script failure execution
/// stops immediately; later scripts are reported as skipped and remain
/// selectable on the next invocation.
pub struct TransactionCoordinator<'a> {
    db: &'a TargetDb,
    journal: &'a Journal,
    vars: &'a HashMap<String, String>,
}

impl<'a> TransactionCoordinator<'a> {
    pub fn new(
        db: &'a TargetDb,
        journal: &'a Journal,
        vars: &'a HashMap<String, String>,
    ) -> Self {
        Self { db, journal, vars }
    }

    /// Plan and execute `scripts` under `discipline`.
    ///
    /// Script failures are carried inside the returned report; only fatal
    /// setup failures (journal reads/writes, transaction control) are `Err`.
    pub fn execute(
        &self,
        scripts: Vec<Script>,
        discipline: TransactionDiscipline,
    ) -> EngineResult<UpgradeReport> {
        log::debug!("executing under {discipline} discipline");
        match discipline {
            TransactionDiscipline::SingleTransaction => self.run_single_transaction(scripts, false),
            TransactionDiscipline::DryRun => self.run_single_transaction(scripts, true),
            TransactionDiscipline::PerScript => self.run_per_script(scripts),
            TransactionDiscipline::NoTransaction => self.run_autocommit(scripts),
        }
    }

    /// Whole plan inside one transaction. The journal read happens inside the
    /// transaction too, so the applied-set cannot race the journal writes.
    fn run_single_transaction(
        &self,
        scripts: Vec<Script>,
        dry_run: bool,
    ) -> EngineResult<UpgradeReport> {
        self.db.begin()?;

        let outcome = self.run_all(self.db.conn(), scripts, dry_run);

        match &outcome {
            Ok(report) if report.successful && !dry_run => {
                if let Err(commit_err) = self.db.commit() {
                    let _ = self.db.rollback();
                    return Err(commit_err.into());
                }
            }
            _ => {
                // failure, fatal error, or dry run: everything rolls back
                let _ = self.db.rollback();
            }
        }
        outcome
    }

    /// One transaction per script; a failure rolls back only that script and
    /// its journal write.
    fn run_per_script(&self, scripts: Vec<Script>) -> EngineResult<UpgradeReport> {
        let applied = self.journal.applied_entries(self.db.conn())?;
        let plan = build_plan(scripts, &applied).into_scripts();

        let mut report = UpgradeReport::new(false);
        for (index, script) in plan.iter().enumerate() {
            let start = Instant::now();
            let result: EngineResult<Vec<String>> = self.db.transaction(|conn| {
                let output = run_script(conn, script, self.vars)?;
                self.record_if_journaled(conn, script)?;
                Ok(output)
            });

            if !self.apply_outcome(&mut report, script, start, result)? {
                self.mark_skipped(&mut report, &plan[index + 1..]);
                break;
            }
        }
        Ok(report)
    }

    /// Autocommit execution, no explicit transactions at all.
    fn run_autocommit(&self, scripts: Vec<Script>) -> EngineResult<UpgradeReport> {
        let conn = self.db.conn();
        let applied = self.journal.applied_entries(conn)?;
        let plan = build_plan(scripts, &applied).into_scripts();

        let mut report = UpgradeReport::new(false);
        for (index, script) in plan.iter().enumerate() {
            let start = Instant::now();
            let result: EngineResult<Vec<String>> = run_script(conn, script, self.vars)
                .and_then(|output| {
                    self.record_if_journaled(conn, script)?;
                    Ok(output)
                });

            if !self.apply_outcome(&mut report, script, start, result)? {
                self.mark_skipped(&mut report, &plan[index + 1..]);
                break;
            }
        }
        Ok(report)
    }

    /// Journal read, planning, and the sequential script loop for the
    /// single-transaction disciplines. Runs inside an open transaction.
    fn run_all(
        &self,
        conn: &Connection,
        scripts: Vec<Script>,
        dry_run: bool,
    ) -> EngineResult<UpgradeReport> {
        let applied = self.journal.applied_entries(conn)?;
        let plan = build_plan(scripts, &applied).into_scripts();

        let mut report = UpgradeReport::new(dry_run);
        for (index, script) in plan.iter().enumerate() {
            let start = Instant::now();
            let result: EngineResult<Vec<String>> = run_script(conn, script, self.vars)
                .and_then(|output| {
                    self.record_if_journaled(conn, script)?;
                    Ok(output)
                });

            if !self.apply_outcome(&mut report, script, start, result)? {
                self.mark_skipped(&mut report, &plan[index + 1..]);
                break;
            }
        }
        Ok(report)
    }

    /// Journal the script unless its policy is `run_always`.
    fn record_if_journaled(&self, conn: &Connection, script: &Script) -> EngineResult<()> {
        if script.policy != ScriptPolicy::RunAlways {
            self.journal.record(conn, script, Utc::now())?;
        }
        Ok(())
    }

    /// Fold one script's outcome into the report.
    ///
    /// Returns `Ok(true)` to continue the plan, `Ok(false)` when a script
    /// failure halts it, and `Err` for fatal non-script errors (journal
    /// writes, transaction control), which abort the whole run.
    fn apply_outcome(
        &self,
        report: &mut UpgradeReport,
        script: &Script,
        start: Instant,
        result: EngineResult<Vec<String>>,
    ) -> EngineResult<bool> {
        let duration_ms = start.elapsed().as_millis() as u64;
        match result {
            Ok(output) => {
                report.record_success(script.name.as_str(), duration_ms, output);
                Ok(true)
            }
            Err(err @ EngineError::ScriptExecution { .. }) => {
                log::warn!("{err}");
                report.record_failure(script.name.as_str(), duration_ms, &err.to_string());
                Ok(false)
            }
            Err(other) => Err(other),
        }
    }

    fn mark_skipped(&self, report: &mut UpgradeReport, rest: &[Script]) {
        for script in rest {
            report.record_skipped(script.name.as_str());
        }
    }
}

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod tests;
