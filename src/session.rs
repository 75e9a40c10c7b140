// src/session.rs

//! Pure planning session.
//!
//! A `PlanSession` turns successive task snapshots into [`PlanView`]s:
//!
//! 1. diff the snapshot against the previous one and roll up the parents of
//!    every task whose dates were edited (or that appeared or disappeared),
//! 2. run the CPM engine over the rolled-up list,
//! 3. derive display rows from the collapse state.
//!
//! It holds no channels and does no IO, so it can be driven directly from
//! tests as well as from the `--watch` shell.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ConfigSection, PlanFile};
use crate::cpm::{CpmEngine, ScheduleDiagnostics, ScheduleOutput};
use crate::hierarchy::{rollup_all, rollup_arena, visibility_rows, CollapseState, VisibilityRow};
use crate::model::{Task, TaskArena};
use crate::types::TaskId;

/// Everything a view layer needs for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanView {
    #[serde(flatten)]
    pub schedule: ScheduleOutput,
    pub diagnostics: ScheduleDiagnostics,
    pub rows: Vec<VisibilityRow>,
}

impl PlanView {
    pub fn row(&self, id: &str) -> Option<&VisibilityRow> {
        self.rows.iter().find(|r| r.id == id)
    }
}

#[derive(Debug, Clone)]
pub struct PlanSession {
    engine: CpmEngine,
    rollup_on_load: bool,
    /// The last snapshot exactly as the caller supplied it.
    previous_input: Option<Vec<Task>>,
    /// The last snapshot after rollup; this is what was scheduled.
    current: Vec<Task>,
}

impl PlanSession {
    pub fn new(engine: CpmEngine, rollup_on_load: bool) -> Self {
        Self {
            engine,
            rollup_on_load,
            previous_input: None,
            current: Vec::new(),
        }
    }

    pub fn from_config(config: &ConfigSection) -> Self {
        Self::new(config.engine(), config.rollup_on_load)
    }

    /// Pick up a (possibly edited) `[config]` section without dropping the
    /// previous snapshot.
    pub fn reconfigure(&mut self, config: &ConfigSection) {
        self.engine = config.engine();
        self.rollup_on_load = config.rollup_on_load;
    }

    /// The task list as last scheduled (rolled-up spans included).
    pub fn tasks(&self) -> &[Task] {
        &self.current
    }

    pub fn apply_plan(&mut self, plan: &PlanFile) -> PlanView {
        self.apply(plan.tasks(), plan.collapsed())
    }

    /// Process one snapshot.
    ///
    /// Rows whose dates did not change since the previous snapshot keep the
    /// span they had after the last rollup, so a parent widened by an
    /// earlier edit stays widened even if the caller re-sends its old dates.
    pub fn apply(&mut self, input: &[Task], collapsed: &CollapseState) -> PlanView {
        let tasks = match self.previous_input.as_deref() {
            None if self.rollup_on_load => {
                debug!("first snapshot; rolling up every parent");
                rollup_all(input)
            }
            None => input.to_vec(),
            Some(previous) => {
                let parents = edited_parents(previous, input);
                if !parents.is_empty() {
                    info!(?parents, "date edits detected; rolling up parents");
                }

                let mut arena = TaskArena::new(carry_rolled_spans(previous, &self.current, input));
                for pid in parents {
                    arena = rollup_arena(Some(&pid), arena);
                }
                arena.into_tasks()
            }
        };

        let schedule = self.engine.schedule(&tasks);
        let rows = visibility_rows(&tasks, collapsed);

        self.previous_input = Some(input.to_vec());
        self.current = tasks;

        PlanView {
            schedule: schedule.output,
            diagnostics: schedule.diagnostics,
            rows,
        }
    }
}

/// Take `input`, but for every row whose dates are the same as in the
/// previous input, use the span it ended up with after the last rollup.
fn carry_rolled_spans(previous: &[Task], rolled: &[Task], input: &[Task]) -> Vec<Task> {
    let before: HashMap<&str, &Task> = previous.iter().map(|t| (t.id.as_str(), t)).collect();
    let rolled: HashMap<&str, &Task> = rolled.iter().map(|t| (t.id.as_str(), t)).collect();

    input
        .iter()
        .map(|task| {
            let unchanged = before
                .get(task.id.as_str())
                .is_some_and(|old| old.start == task.start && old.end == task.end);

            match rolled.get(task.id.as_str()) {
                Some(r) if unchanged => Task {
                    start: r.start.clone(),
                    end: r.end.clone(),
                    ..task.clone()
                },
                _ => task.clone(),
            }
        })
        .collect()
}

/// Parents to roll up for a new snapshot: the parents of tasks whose
/// `start`/`end` changed, of new tasks, and of removed tasks.
pub fn edited_parents(previous: &[Task], current: &[Task]) -> Vec<TaskId> {
    let before: HashMap<&str, &Task> = previous.iter().map(|t| (t.id.as_str(), t)).collect();
    let after: HashMap<&str, &Task> = current.iter().map(|t| (t.id.as_str(), t)).collect();

    let mut parents: BTreeSet<TaskId> = BTreeSet::new();

    for task in current {
        let edited = match before.get(task.id.as_str()) {
            Some(old) => {
                old.start != task.start || old.end != task.end || old.parent() != task.parent()
            }
            None => true,
        };
        if edited {
            if let Some(parent) = task.parent() {
                parents.insert(parent.to_string());
            }
            if let Some(old_parent) = before.get(task.id.as_str()).and_then(|old| old.parent()) {
                parents.insert(old_parent.to_string());
            }
        }
    }

    for task in previous {
        if !after.contains_key(task.id.as_str()) {
            if let Some(parent) = task.parent() {
                parents.insert(parent.to_string());
            }
        }
    }

    parents.retain(|p| after.contains_key(p.as_str()));
    parents.into_iter().collect()
}
