// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_plan_path;
use crate::types::{OutputFormat, ScheduleStrategy};

/// Command-line arguments for `critpath`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "critpath",
    version,
    about = "Compute the critical path, slack and rolled-up spans of a task plan.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the plan file (TOML, or JSON when the extension is `.json`).
    ///
    /// Default: `Plan.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value_os_t = default_plan_path())]
    pub plan: PathBuf,

    /// Output format for the rendered plan.
    #[arg(long, value_enum, value_name = "FORMAT", default_value = "text")]
    pub format: FormatArg,

    /// Override the `[config].strategy` of the plan file.
    #[arg(long, value_enum, value_name = "STRATEGY")]
    pub strategy: Option<StrategyArg>,

    /// Also print rows hidden under collapsed parents.
    #[arg(long)]
    pub show_hidden: bool,

    /// Keep running and recompute whenever the plan file changes.
    #[arg(long)]
    pub watch: bool,

    /// Reject plans whose dependencies form a cycle instead of scheduling
    /// them with the bounded iteration.
    #[arg(long)]
    pub strict: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CRITPATH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, list tasks, but don't schedule anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum StrategyArg {
    Iterate,
    TopoFirst,
}

impl From<StrategyArg> for ScheduleStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Iterate => ScheduleStrategy::Iterate,
            StrategyArg::TopoFirst => ScheduleStrategy::TopoFirst,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
