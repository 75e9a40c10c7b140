// src/cpm/output.rs

use serde::Serialize;

use crate::model::{DependencySet, Task};
use crate::types::{ScheduleStrategy, TaskId};

/// A task enriched with its computed schedule.
///
/// Rebuilt from scratch on every engine run; never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledTask {
    #[serde(flatten)]
    pub task: Task,

    /// Position in the input list, for layout ordering only.
    pub index: usize,

    /// Inclusive day count; 0 marks an unscheduled task.
    pub duration: i64,

    #[serde(rename = "ES")]
    pub es: String,
    #[serde(rename = "EF")]
    pub ef: String,
    #[serde(rename = "LS")]
    pub ls: Option<String>,
    #[serde(rename = "LF")]
    pub lf: Option<String>,

    pub successors: DependencySet,

    /// `LF - EF` in days, `None` when either side was never computed.
    pub float: Option<i64>,

    #[serde(rename = "isCritical")]
    pub is_critical: bool,
}

impl ScheduledTask {
    pub fn id(&self) -> &str {
        &self.task.id
    }
}

/// The engine's function-call contract: critical ids plus enriched rows,
/// both in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOutput {
    pub critical_task_ids: Vec<TaskId>,
    pub scheduled_tasks: Vec<ScheduledTask>,
}

impl ScheduleOutput {
    pub fn get(&self, id: &str) -> Option<&ScheduledTask> {
        self.scheduled_tasks.iter().find(|t| t.id() == id)
    }
}

/// How a run went. Informational only: hitting the cap is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDiagnostics {
    pub strategy: ScheduleStrategy,
    pub iteration_cap: usize,
    pub forward_iterations: usize,
    pub forward_converged: bool,
    pub backward_iterations: usize,
    pub backward_converged: bool,
    /// Latest earliest-finish over all scheduled tasks.
    pub project_finish: Option<String>,
    /// A task found on a dependency cycle (only detected by `topo-first`).
    pub cycle_task: Option<TaskId>,
}

impl ScheduleDiagnostics {
    pub fn converged(&self) -> bool {
        self.forward_converged && self.backward_converged
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    #[serde(flatten)]
    pub output: ScheduleOutput,
    pub diagnostics: ScheduleDiagnostics,
}
