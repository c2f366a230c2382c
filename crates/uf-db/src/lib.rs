//! uf-db - Target database layer for Upflow
//!
//! Owns the DuckDB connection to the migration target and provides the
//! transaction primitives the engine's disciplines are built from. The
//! engine is single-threaded and synchronous, so this is a plain connection
//! wrapper with no locking.

pub mod error;
pub mod target;

pub use error::{DbError, DbResult};
pub use target::TargetDb;
