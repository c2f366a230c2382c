//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use uf_core::Config;
use uf_db::TargetDb;
use uf_engine::{DirectorySource, EngineSettings, MigrationEngine};

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Intentionally empty: ExitCode is a control-flow mechanism, not a
        // user-facing error; main.rs unwraps it into the process exit code.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Resolve the project root from global args.
pub(crate) fn project_root(global: &GlobalArgs) -> PathBuf {
    PathBuf::from(&global.project_dir)
}

/// Load the project configuration, honoring a `--config` override.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path)),
        None => Config::load_from_dir(&project_root(global)),
    }
    .context("failed to load project configuration")?;

    if global.verbose {
        eprintln!(
            "[verbose] project '{}', database '{}', journal {}.{}",
            config.name, config.database.path, config.journal.schema, config.journal.table
        );
    }
    Ok(config)
}

/// Open the target database and assemble the engine over the project's
/// script directory.
///
/// Creates the database file's parent directory so a fresh checkout can
/// migrate without manual setup (DuckDB creates the file itself on open).
pub(crate) fn open_engine(
    global: &GlobalArgs,
    config: &Config,
) -> Result<MigrationEngine<DirectorySource>> {
    let root = project_root(global);

    if config.database.path != ":memory:" {
        let db_path = root.join(&config.database.path);
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    let db = if config.database.path == ":memory:" {
        TargetDb::new(":memory:")
    } else {
        TargetDb::open(&root.join(&config.database.path))
    }
    .context("failed to open target database")?;

    let source = DirectorySource::from_config(&root, config);
    Ok(MigrationEngine::new(
        db,
        source,
        EngineSettings::from_config(config),
    ))
}
