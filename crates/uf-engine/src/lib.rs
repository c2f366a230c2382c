//! uf-engine - Upflow migration engine
//!
//! Applies an ordered set of versioned SQL change scripts against a target
//! DuckDB database exactly once (or, for designated script classes, every
//! run). Components, leaves first:
//!
//! - [`source`]: enumerates candidate scripts as (name, group, policy,
//!   content) tuples
//! - [`journal`]: durable record of applied scripts, inside the target
//!   database
//! - [`planner`]: merges discovery with journal state into the ordered plan
//! - [`coordinator`]: wraps execution in a transactional discipline
//! - [`executor`]: runs one script's statement batches
//! - [`preview`]: serializes a plan to a file without executing anything
//!
//! [`engine::MigrationEngine`] ties them together behind a small facade.

pub mod coordinator;
pub mod engine;
pub mod error;
pub mod executor;
pub mod journal;
pub mod planner;
pub mod preview;
pub mod source;

pub use coordinator::{TransactionCoordinator, TransactionDiscipline};
pub use engine::{EngineSettings, MigrationEngine};
pub use error::{EngineError, EngineResult};
pub use journal::{Journal, JournalEntry};
pub use planner::build_plan;
pub use source::{DirectorySource, ScriptSource, StaticSource};
