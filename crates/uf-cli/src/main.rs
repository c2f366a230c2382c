//! Upflow CLI - apply versioned SQL change scripts to a database

use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{apply, common::ExitCode, init, plan, status};

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        cli::Commands::Init(args) => init::execute(args),
        cli::Commands::Apply(args) => apply::execute(args, &cli.global),
        cli::Commands::Plan(args) => plan::execute(args, &cli.global),
        cli::Commands::Status(args) => status::execute(args, &cli.global),
    };

    if let Err(e) = result {
        if let Some(code) = e.downcast_ref::<ExitCode>() {
            std::process::exit(code.0);
        }
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
