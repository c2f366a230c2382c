//! Plan command implementation
//!
//! Computes the pending plan and serializes it to a file without executing
//! or journaling anything.

use anyhow::Result;
use std::path::Path;

use crate::cli::{GlobalArgs, PlanArgs};
use crate::commands::common::{load_config, open_engine};

/// Execute the plan command
pub fn execute(args: &PlanArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let engine = open_engine(global, &config)?;

    let output = Path::new(&args.output);
    let plan = engine.write_plan(output)?;

    if plan.is_empty() {
        println!("Nothing to apply: wrote an empty plan to {}", args.output);
    } else {
        println!("Wrote {} script(s) to {}", plan.len(), args.output);
        if global.verbose {
            for name in plan.names() {
                eprintln!("[verbose]   {name}");
            }
        }
    }
    Ok(())
}
