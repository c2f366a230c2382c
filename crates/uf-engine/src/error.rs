//! Error types for uf-engine

use thiserror::Error;
use uf_db::DbError;

/// Migration engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Script discovery failed (M001)
    #[error("[M001] Script discovery failed: {message}")]
    Discovery { message: String },

    /// Two scripts resolved to the same name (M002)
    #[error("[M002] Duplicate script name: {name}")]
    DuplicateScript { name: String },

    /// Journal table could not be created or read (M003)
    #[error("[M003] Journal initialization failed: {message}")]
    JournalInit { message: String },

    /// One statement batch of a script failed (M004)
    #[error("[M004] Script '{script}' failed at statement {statement_index}: {source}")]
    ScriptExecution {
        script: String,
        statement_index: usize,
        source: DbError,
    },

    /// Preview output destination already exists (M005)
    #[error("[M005] Output file already exists: {path}")]
    OutputTargetExists { path: String },

    /// Preview output could not be written (M006)
    #[error("[M006] Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: String,
        source: std::io::Error,
    },

    /// Database error
    #[error(transparent)]
    Db(#[from] DbError),

    /// Core error (configuration, IO)
    #[error(transparent)]
    Core(#[from] uf_core::CoreError),
}

/// Result type alias for EngineError
pub type EngineResult<T> = Result<T, EngineError>;
