// src/lib.rs

pub mod cli;
pub mod config;
pub mod cpm;
pub mod dates;
pub mod errors;
pub mod hierarchy;
pub mod logging;
pub mod model;
pub mod report;
pub mod session;
pub mod types;
pub mod watch;

use std::io;
use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{ensure_acyclic, load_and_validate, PlanFile};
use crate::errors::Result;
use crate::session::PlanSession;
use crate::types::OutputFormat;
use crate::watch::{spawn_plan_watcher, WatchEvent, WatchOptions, WatchRuntime};

pub use crate::cpm::{compute_critical_path, CpmEngine, ScheduleOutput, ScheduledTask};
pub use crate::hierarchy::{depth, is_hidden, rollup, CollapseState};
pub use crate::model::Task;

/// High-level entry point used by `main.rs`.
///
/// One-shot mode loads, validates, plans and prints once. `--watch` wires
/// the plan watcher, Ctrl-C handling and the watch runtime together.
pub async fn run(args: CliArgs) -> Result<()> {
    let plan_path = args.plan.clone();
    let format: OutputFormat = args.format.into();

    if args.watch {
        return run_watch(plan_path, &args, format).await;
    }

    let mut plan = load_and_validate(&plan_path)?;
    if let Some(strategy) = args.strategy {
        plan.set_strategy(strategy.into());
    }

    if args.dry_run {
        print_dry_run(&plan);
        return Ok(());
    }

    if args.strict {
        ensure_acyclic(plan.tasks())?;
    }

    let mut session = PlanSession::from_config(plan.config());
    let view = session.apply_plan(&plan);
    println!("{}", report::render(&view, format, args.show_hidden)?);
    Ok(())
}

async fn run_watch(plan_path: PathBuf, args: &CliArgs, format: OutputFormat) -> Result<()> {
    let (tx, rx) = mpsc::channel::<WatchEvent>(64);

    let _watcher = spawn_plan_watcher(&plan_path, tx.clone())?;

    // Ctrl-C -> graceful shutdown.
    {
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(WatchEvent::ShutdownRequested).await;
        });
    }

    let options = WatchOptions {
        format,
        show_hidden: args.show_hidden,
        strict: args.strict,
        strategy: args.strategy.map(Into::into),
    };

    info!(plan = ?plan_path, "starting watch mode");
    WatchRuntime::new(plan_path, options, rx, io::stdout()).run().await?;
    Ok(())
}

/// Dry-run output: configuration and the task list, no scheduling.
fn print_dry_run(plan: &PlanFile) {
    println!("critpath dry-run");
    println!("  config.strategy = {}", plan.config().strategy);
    println!("  config.iteration_factor = {}", plan.config().iteration_factor);
    println!("  config.rollup_on_load = {}", plan.config().rollup_on_load);
    println!();

    println!("tasks ({}):", plan.tasks().len());
    for task in plan.tasks() {
        println!("  - {} {}", task.id, task.name);
        println!("      span: {} .. {} ({} days)", task.start, task.end, task.duration());
        if let Some(parent) = task.parent() {
            println!("      parent: {parent}");
        }
        if !task.dependencies.is_empty() {
            println!("      dependencies: {}", task.dependencies);
        }
        if plan.collapsed().get(&task.id).copied().unwrap_or(false) {
            println!("      collapsed: true");
        }
    }

    debug!("dry-run complete (nothing scheduled)");
}
