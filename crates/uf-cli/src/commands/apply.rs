//! Apply command implementation

use anyhow::Result;
use uf_core::{RunStatus, UpgradeReport};
use uf_engine::TransactionDiscipline;

use crate::cli::{ApplyArgs, GlobalArgs, OutputFormat, TransactionMode};
use crate::commands::common::{load_config, open_engine, ExitCode};

/// Map CLI flags to the engine's transaction discipline.
///
/// `--dry-run` wins over `--transaction`: a dry run is only meaningful as
/// the always-rollback variant of the single-transaction discipline.
fn discipline_for(args: &ApplyArgs) -> TransactionDiscipline {
    if args.dry_run {
        return TransactionDiscipline::DryRun;
    }
    match args.transaction {
        TransactionMode::Single => TransactionDiscipline::SingleTransaction,
        TransactionMode::PerScript => TransactionDiscipline::PerScript,
        TransactionMode::None => TransactionDiscipline::NoTransaction,
    }
}

/// Execute the apply command
pub fn execute(args: &ApplyArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let engine = open_engine(global, &config)?;

    let discipline = discipline_for(args);
    let report = engine.perform_upgrade(discipline)?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report, global.verbose),
    }

    if !report.successful {
        return Err(ExitCode(1).into());
    }
    Ok(())
}

fn print_report(report: &UpgradeReport, verbose: bool) {
    if report.dry_run {
        println!("Dry run: all changes will be rolled back");
    }

    if report.scripts.is_empty() {
        println!("Nothing to apply: all scripts are up to date");
        return;
    }

    for script in &report.scripts {
        match script.status {
            RunStatus::Success => {
                println!("  \u{2713} {} [{}ms]", script.name, script.duration_ms);
                if verbose {
                    for line in &script.output {
                        println!("      {line}");
                    }
                }
            }
            RunStatus::Error => println!(
                "  \u{2717} {} - {} [{}ms]",
                script.name,
                script.error.as_deref().unwrap_or("unknown error"),
                script.duration_ms
            ),
            RunStatus::Skipped => println!("  - {} (skipped)", script.name),
        }
    }

    let summary = report.summary();
    if report.successful {
        println!(
            "\nApplied {} script(s) successfully (run {})",
            summary.succeeded, report.run_id
        );
    } else {
        println!(
            "\nMigration failed: {} applied, {} failed, {} skipped (run {})",
            summary.succeeded, summary.failed, summary.skipped, report.run_id
        );
        if let Some(script) = &report.error_script {
            println!("Failing script: {script}");
        }
        if let Some(error) = &report.error {
            println!("Error: {error}");
        }
    }
}
