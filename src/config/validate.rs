// src/config/validate.rs

use std::collections::HashSet;

use tracing::warn;

use crate::config::model::{PlanFile, RawPlanFile};
use crate::cpm::{topological_order, DependencyGraph};
use crate::errors::{CritpathError, Result};
use crate::model::{Task, TaskArena};

impl TryFrom<RawPlanFile> for PlanFile {
    type Error = CritpathError;

    fn try_from(raw: RawPlanFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_plan(&raw)?;
        Ok(PlanFile::new_unchecked(raw.config, raw.collapsed, raw.task))
    }
}

/// Checks:
/// - `iteration_factor >= 1`
/// - task ids are unique and non-empty
/// - `progress` is within 0..=100
///
/// Dangling `dependencies` / `parentId` references are logged, not
/// rejected: the engine ignores them, and a plan that is being edited
/// routinely has them for a moment.
fn validate_raw_plan(raw: &RawPlanFile) -> Result<()> {
    validate_global_config(raw)?;
    validate_task_ids(&raw.task)?;
    validate_progress(&raw.task)?;
    warn_dangling_references(&raw.task);
    Ok(())
}

fn validate_global_config(raw: &RawPlanFile) -> Result<()> {
    if raw.config.iteration_factor == 0 {
        return Err(CritpathError::ConfigError(
            "[config].iteration_factor must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_task_ids(tasks: &[Task]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for (idx, task) in tasks.iter().enumerate() {
        if task.id.trim().is_empty() {
            return Err(CritpathError::ConfigError(format!(
                "task at position {} has an empty id",
                idx
            )));
        }
        if !seen.insert(task.id.as_str()) {
            return Err(CritpathError::ConfigError(format!(
                "duplicate task id '{}'",
                task.id
            )));
        }
    }
    Ok(())
}

fn validate_progress(tasks: &[Task]) -> Result<()> {
    for task in tasks {
        if task.progress > 100 {
            return Err(CritpathError::ConfigError(format!(
                "task '{}' has progress {} (expected 0..=100)",
                task.id, task.progress
            )));
        }
    }
    Ok(())
}

fn warn_dangling_references(tasks: &[Task]) {
    let ids: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();

    for task in tasks {
        for dep in task.dependencies.iter() {
            if !ids.contains(dep) {
                warn!(task = %task.id, dep = %dep, "dependency names no task; it will be ignored");
            }
        }
        if let Some(parent) = task.parent() {
            if !ids.contains(parent) {
                warn!(task = %task.id, parent = %parent, "parentId names no task");
            }
        }
    }
}

/// Reject task lists whose dependencies form a cycle.
///
/// The engine itself copes with cycles (bounded iteration); this is for
/// callers that would rather fail loudly.
pub fn ensure_acyclic(tasks: &[Task]) -> Result<()> {
    let arena = TaskArena::from_slice(tasks);
    let graph = DependencyGraph::from_arena(&arena);

    match topological_order(&graph) {
        Ok(_order) => Ok(()),
        Err(row) => Err(CritpathError::DependencyCycle(format!(
            "cycle detected in task dependencies involving task '{}'",
            arena.tasks()[row].id
        ))),
    }
}
