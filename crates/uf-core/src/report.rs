//! Structured result of an upgrade invocation.
//!
//! The engine returns an [`UpgradeReport`] and leaves presentation to the
//! caller (console, JSON, telemetry). Reports are created fresh per
//! invocation and never persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Outcome of running one plan.
#[derive(Debug, Clone, Serialize)]
pub struct UpgradeReport {
    /// Unique identifier for this run
    pub run_id: String,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Whether this run executed under the always-rollback discipline
    pub dry_run: bool,

    /// Overall success flag; an empty plan is a successful no-op
    pub successful: bool,

    /// Per-script outcomes, in plan order
    pub scripts: Vec<ScriptRunReport>,

    /// Name of the first failing script, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_script: Option<String>,

    /// Error detail for the first failing script
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of one script within a run.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptRunReport {
    /// Script name
    pub name: String,

    /// Final status
    pub status: RunStatus,

    /// How long the script took to execute (in milliseconds)
    pub duration_ms: u64,

    /// Captured diagnostic output, one line per statement batch
    pub output: Vec<String>,

    /// Error message when status is `error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Status of one script within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Executed to completion
    Success,
    /// First failing script; halted the plan
    Error,
    /// Not attempted because an earlier script failed
    Skipped,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Success => write!(f, "success"),
            RunStatus::Error => write!(f, "error"),
            RunStatus::Skipped => write!(f, "skipped"),
        }
    }
}

impl UpgradeReport {
    /// Create an empty, so-far-successful report.
    pub fn new(dry_run: bool) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string()[..8].to_string(),
            started_at: Utc::now(),
            dry_run,
            successful: true,
            scripts: Vec::new(),
            error_script: None,
            error: None,
        }
    }

    /// Record a script that executed to completion.
    pub fn record_success(&mut self, name: &str, duration_ms: u64, output: Vec<String>) {
        self.scripts.push(ScriptRunReport {
            name: name.to_string(),
            status: RunStatus::Success,
            duration_ms,
            output,
            error: None,
        });
    }

    /// Record the first failing script. Marks the whole run unsuccessful.
    pub fn record_failure(&mut self, name: &str, duration_ms: u64, error: &str) {
        self.successful = false;
        self.error_script = Some(name.to_string());
        self.error = Some(error.to_string());
        self.scripts.push(ScriptRunReport {
            name: name.to_string(),
            status: RunStatus::Error,
            duration_ms,
            output: Vec::new(),
            error: Some(error.to_string()),
        });
    }

    /// Record a script left unexecuted because an earlier one failed.
    pub fn record_skipped(&mut self, name: &str) {
        self.scripts.push(ScriptRunReport {
            name: name.to_string(),
            status: RunStatus::Skipped,
            duration_ms: 0,
            output: Vec::new(),
            error: None,
        });
    }

    /// Summary counts for presentation.
    pub fn summary(&self) -> UpgradeSummary {
        let mut summary = UpgradeSummary::default();
        for script in &self.scripts {
            match script.status {
                RunStatus::Success => summary.succeeded += 1,
                RunStatus::Error => summary.failed += 1,
                RunStatus::Skipped => summary.skipped += 1,
            }
        }
        summary
    }
}

/// Summary counts for an upgrade run.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpgradeSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}
