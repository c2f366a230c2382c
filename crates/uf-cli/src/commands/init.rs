//! Init command implementation - scaffold a new migration project

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::cli::InitArgs;

const DEFAULT_CONFIG: &str = r#"name: my_project

database:
  path: target/app.duckdb

journal:
  schema: upflow
  table: schema_versions

script_dir: scripts

# Scripts run in (group, name) order. run_always groups are re-executed on
# every invocation; run_once groups are journaled and applied exactly once.
groups:
  - subdir: pre_deployment
    order: 10
    policy: run_once
  - subdir: schemas
    order: 20
    policy: run_once
  - subdir: tables
    order: 30
    policy: run_once
  - subdir: views
    order: 40
    policy: run_always
  - subdir: functions
    order: 50
    policy: run_always
  - subdir: post_deployment
    order: 70
    policy: run_once

vars:
  person_table: person
"#;

const SAMPLE_SCRIPT: &str = "CREATE TABLE IF NOT EXISTS $person_table$ (\n    \
    id INTEGER PRIMARY KEY,\n    \
    name VARCHAR NOT NULL\n\
);\n";

const SCRIPT_SUBDIRS: &[&str] = &[
    "pre_deployment",
    "schemas",
    "tables",
    "views",
    "functions",
    "post_deployment",
];

/// Execute the init command
pub fn execute(args: &InitArgs) -> Result<()> {
    let root = Path::new(&args.path);
    let config_path = root.join("upflow.yml");

    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }

    std::fs::create_dir_all(root)
        .with_context(|| format!("failed to create {}", root.display()))?;
    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", config_path.display()))?;

    for subdir in SCRIPT_SUBDIRS {
        let dir = root.join("scripts").join(subdir);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    std::fs::write(
        root.join("scripts/tables/000001-create-person.sql"),
        SAMPLE_SCRIPT,
    )
    .context("failed to write sample script")?;

    println!("Initialized migration project in {}", root.display());
    println!("Edit upflow.yml, drop .sql scripts under scripts/, then run 'uf apply'");
    Ok(())
}
