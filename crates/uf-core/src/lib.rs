//! uf-core - Core library for Upflow
//!
//! This crate provides the shared types used across all Upflow components:
//! migration scripts and their execution policies, the execution plan,
//! structured run reports, project configuration, and SQL text utilities.

pub mod checksum;
pub mod config;
pub mod error;
pub mod plan;
pub mod report;
pub mod script;
pub mod script_name;
pub mod sql_utils;

pub use checksum::compute_checksum;
pub use config::{Config, DatabaseConfig, GroupRule, JournalConfig};
pub use error::{CoreError, CoreResult};
pub use plan::ExecutionPlan;
pub use report::{RunStatus, ScriptRunReport, UpgradeReport, UpgradeSummary};
pub use script::{Script, ScriptPolicy};
pub use script_name::ScriptName;
