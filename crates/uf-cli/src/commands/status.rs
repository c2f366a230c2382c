//! Status command implementation

use anyhow::Result;
use serde_json::json;

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::{load_config, open_engine};

/// Execute the status command
pub fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let engine = open_engine(global, &config)?;

    let status = engine.status()?;

    match args.output {
        StatusOutput::Json => {
            let entries: Vec<_> = status
                .iter()
                .map(|(script, applied)| {
                    json!({
                        "name": script.name.as_str(),
                        "group": script.group,
                        "policy": script.policy.to_string(),
                        "applied": applied,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        StatusOutput::Table => {
            if status.is_empty() {
                println!("No scripts discovered under '{}'", config.script_dir);
                return Ok(());
            }
            println!("{:<50} {:>6} {:<14} {}", "SCRIPT", "GROUP", "POLICY", "STATE");
            for (script, applied) in &status {
                let state = if *applied { "applied" } else { "pending" };
                println!(
                    "{:<50} {:>6} {:<14} {}",
                    script.name.as_str(),
                    script.group,
                    script.policy.to_string(),
                    state
                );
            }
        }
    }
    Ok(())
}
