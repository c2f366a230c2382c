//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Upflow - apply versioned SQL change scripts to a database
#[derive(Parser, Debug)]
#[command(name = "uf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new migration project
    Init(InitArgs),

    /// Apply pending scripts to the target database
    Apply(ApplyArgs),

    /// Write the pending plan to a file without executing anything
    Plan(PlanArgs),

    /// List discovered scripts and their applied state
    Status(StatusArgs),
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to scaffold into
    #[arg(default_value = ".")]
    pub path: String,
}

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Execute inside a transaction that is always rolled back
    #[arg(long)]
    pub dry_run: bool,

    /// Transaction discipline for the run
    #[arg(short, long, value_enum, default_value = "single")]
    pub transaction: TransactionMode,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Transaction discipline selector
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionMode {
    /// One transaction for the entire plan (all-or-nothing)
    Single,
    /// One transaction per script (partial progress is retained)
    PerScript,
    /// No explicit transactions (autocommit)
    None,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Destination file; must not already exist
    #[arg(short, long)]
    pub output: String,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Apply output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable per-script lines
    Text,
    /// Structured JSON report
    Json,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}
