//! CLI argument parsing for recording failures and planning reruns.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gauge-rerun",
    version,
    about = "Record failed scenarios and rerun only those",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Emit debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Record(RecordArgs),
    Rerun(RerunArgs),
}

/// Record inputs: a finished suite and the flags it ran with.
#[derive(Parser, Debug)]
#[command(about = "Publish a suite result and persist its failed scenarios")]
pub struct RecordArgs {
    /// Project root (defaults to GAUGE_PROJECT_ROOT, then the current directory)
    #[arg(long, value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Suite result JSON with spec_results[].{file_name,is_failed,failed_scenario_indices}
    #[arg(long, value_name = "PATH")]
    pub suite_result: PathBuf,

    /// Invocation flag to remember for the rerun (repeatable)
    #[arg(long = "flag", value_name = "NAME=VALUE", allow_hyphen_values = true)]
    pub flags: Vec<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Print the flags and scenarios to rerun from the last run")]
pub struct RerunArgs {
    /// Project root (defaults to GAUGE_PROJECT_ROOT, then the current directory)
    #[arg(long, value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}
