// src/types.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// Task identifiers are the free-text ids the caller assigns.
pub type TaskId = String;

/// How the CPM engine orders its traversal.
///
/// - `Iterate` (default): walk tasks in input order and repeat until nothing
///   changes or the iteration cap is hit.
/// - `TopoFirst`: try a topological sort first and walk in that order; fall
///   back to `Iterate` if the dependency graph has a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScheduleStrategy {
    #[default]
    Iterate,
    TopoFirst,
}

impl fmt::Display for ScheduleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleStrategy::Iterate => f.write_str("iterate"),
            ScheduleStrategy::TopoFirst => f.write_str("topo-first"),
        }
    }
}

/// Output format for the rendered plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
