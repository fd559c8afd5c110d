use anyhow::{Context, Result};
use clap::Parser;
use gauge_rerun::config::{parse_flags, resolve_project_root};
use gauge_rerun::paths::ProjectPaths;
use gauge_rerun::{
    listen_failed_scenarios, EventRegistry, ExecutionEvent, RerunPlan, RunSession, SuiteResult,
};
use std::fs;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Command, RecordArgs, RerunArgs, RootArgs};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Record(args) => cmd_record(args),
        Command::Rerun(args) => cmd_rerun(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_record(args: RecordArgs) -> Result<()> {
    let project_root = resolve_project_root(args.project_root.as_deref())?;
    let bytes = fs::read(&args.suite_result)
        .with_context(|| format!("read {}", args.suite_result.display()))?;
    let suite: SuiteResult =
        serde_json::from_slice(&bytes).context("parse suite result JSON")?;

    let session = RunSession::new(project_root);
    session.set_flags(parse_flags(args.flags.as_slice())?);

    let mut registry = EventRegistry::new();
    listen_failed_scenarios(&mut registry, &session);
    let errors = registry.notify(&ExecutionEvent::suite_end(suite));
    if let Some(err) = errors.into_iter().next() {
        return Err(err.context("record failed scenarios"));
    }

    let failed_file = ProjectPaths::new(session.project_root().to_path_buf()).failed_file();
    println!(
        "Recorded {} failed scenario(s) in {}",
        session.metadata().failed_scenarios.len(),
        failed_file.display()
    );
    Ok(())
}

fn cmd_rerun(args: RerunArgs) -> Result<()> {
    let project_root = resolve_project_root(args.project_root.as_deref())?;
    let plan = RerunPlan::load(&project_root)?;
    if args.json {
        let text = serde_json::to_string_pretty(&plan).context("serialize rerun plan")?;
        println!("{text}");
        return Ok(());
    }
    println!("{}", shell_words::join(plan.args()));
    Ok(())
}
