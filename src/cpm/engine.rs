// src/cpm/engine.rs

//! Forward/backward passes iterated to a fixed point.
//!
//! Tasks arrive in whatever order the caller keeps them, with dependency
//! edges that may dangle or even loop while someone is mid-edit. Instead of
//! requiring a sorted, validated graph, each pass is repeated until a full
//! sweep changes nothing, bounded by `iteration_factor × task count` sweeps.
//! Whatever has been computed when the bound is hit is returned as-is.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::cpm::graph::DependencyGraph;
use crate::cpm::order::Traversal;
use crate::cpm::output::{Schedule, ScheduleDiagnostics, ScheduleOutput, ScheduledTask};
use crate::dates::{self, days_between, earlier, format_date, later, shift};
use crate::model::{Task, TaskArena};
use crate::types::ScheduleStrategy;

/// Sweeps allowed per task before a pass gives up.
pub const DEFAULT_ITERATION_FACTOR: usize = 2;

/// Working state of one row during a run.
#[derive(Debug, Clone)]
struct Slot {
    duration: i64,
    /// Declared start; `None` for unscheduled rows.
    start: Option<NaiveDate>,
    /// `(ES, EF)`, `None` for unscheduled rows.
    early: Option<(NaiveDate, NaiveDate)>,
    /// `(LS, LF)`, `None` until the backward pass reaches the row.
    late: Option<(NaiveDate, NaiveDate)>,
}

impl Slot {
    fn seed(task: &Task) -> Self {
        let duration = task.duration();
        let early = if duration > 0 {
            dates::parse_date(&task.start).zip(dates::parse_date(&task.end))
        } else {
            None
        };
        Self {
            duration,
            start: early.map(|(s, _)| s),
            early,
            late: None,
        }
    }

    fn is_scheduled(&self) -> bool {
        self.early.is_some()
    }
}

#[derive(Debug, Clone, Copy)]
struct PassReport {
    iterations: usize,
    converged: bool,
}

/// CPM scheduler. Holds configuration only; every call to
/// [`CpmEngine::schedule`] works on a fresh copy of the input.
#[derive(Debug, Clone, Copy)]
pub struct CpmEngine {
    strategy: ScheduleStrategy,
    iteration_factor: usize,
}

impl Default for CpmEngine {
    fn default() -> Self {
        Self {
            strategy: ScheduleStrategy::Iterate,
            iteration_factor: DEFAULT_ITERATION_FACTOR,
        }
    }
}

impl CpmEngine {
    pub fn new(strategy: ScheduleStrategy, iteration_factor: usize) -> Self {
        Self {
            strategy,
            iteration_factor: iteration_factor.max(1),
        }
    }

    /// Run the full CPM pipeline over a task snapshot.
    pub fn schedule(&self, tasks: &[Task]) -> Schedule {
        let arena = TaskArena::from_slice(tasks);
        let graph = DependencyGraph::from_arena(&arena);
        let traversal = Traversal::for_strategy(self.strategy, &graph);
        let cap = self.iteration_factor.saturating_mul(arena.len());

        let mut slots: Vec<Slot> = arena.tasks().iter().map(Slot::seed).collect();

        let forward = forward_pass(&mut slots, &graph, &traversal.forward, cap);

        let project_finish = slots
            .iter()
            .filter_map(|s| s.early.map(|(_, ef)| ef))
            .fold(None, |acc, ef| later(acc, Some(ef)));

        let backward = backward_pass(&mut slots, &graph, &traversal.backward, project_finish, cap);

        if !forward.converged || !backward.converged {
            warn!(
                cap,
                forward_converged = forward.converged,
                backward_converged = backward.converged,
                "iteration cap reached; returning partial schedule"
            );
        }

        let scheduled_tasks: Vec<ScheduledTask> = arena
            .tasks()
            .iter()
            .enumerate()
            .map(|(idx, task)| finish_row(task, idx, &slots[idx], &graph, &arena))
            .collect();

        let critical_task_ids: Vec<_> = scheduled_tasks
            .iter()
            .filter(|t| t.is_critical)
            .map(|t| t.task.id.clone())
            .collect();

        info!(
            tasks = scheduled_tasks.len(),
            critical = critical_task_ids.len(),
            forward_iterations = forward.iterations,
            backward_iterations = backward.iterations,
            "critical path computed"
        );

        let diagnostics = ScheduleDiagnostics {
            strategy: self.strategy,
            iteration_cap: cap,
            forward_iterations: forward.iterations,
            forward_converged: forward.converged,
            backward_iterations: backward.iterations,
            backward_converged: backward.converged,
            project_finish: project_finish.map(format_date),
            cycle_task: traversal.cycle_row.map(|row| arena.tasks()[row].id.clone()),
        };

        Schedule {
            output: ScheduleOutput {
                critical_task_ids,
                scheduled_tasks,
            },
            diagnostics,
        }
    }
}

/// Schedule with the default engine and return only the output contract.
pub fn compute_critical_path(tasks: &[Task]) -> ScheduleOutput {
    CpmEngine::default().schedule(tasks).output
}

/// Earliest dates: `ES = max(start, max(pred.EF + 1))`, `EF = ES + duration - 1`.
fn forward_pass(
    slots: &mut [Slot],
    graph: &DependencyGraph,
    order: &[usize],
    cap: usize,
) -> PassReport {
    let mut report = PassReport {
        iterations: 0,
        converged: slots.is_empty(),
    };

    while report.iterations < cap {
        report.iterations += 1;
        let mut changed = false;

        for &idx in order {
            let preds = graph.predecessors_of(idx);
            let (Some(start), Some(current)) = (slots[idx].start, slots[idx].early) else {
                continue;
            };
            if preds.is_empty() {
                continue;
            }

            let from_preds = preds
                .iter()
                .filter_map(|&p| slots[p].early.and_then(|(_, ef)| shift(ef, 1)))
                .fold(None, |acc, d| later(acc, Some(d)));

            let Some(es) = later(from_preds, Some(start)) else {
                continue;
            };
            let Some(ef) = shift(es, slots[idx].duration - 1) else {
                continue;
            };

            if (es, ef) != current {
                slots[idx].early = Some((es, ef));
                changed = true;
            }
        }

        debug!(iteration = report.iterations, changed, "forward pass sweep");

        if !changed {
            report.converged = true;
            break;
        }
    }

    report
}

/// Latest dates: rows with no scheduled successor finish at the project
/// finish; every other row must finish the day before its earliest-starting
/// successor may start.
fn backward_pass(
    slots: &mut [Slot],
    graph: &DependencyGraph,
    order: &[usize],
    project_finish: Option<NaiveDate>,
    cap: usize,
) -> PassReport {
    let mut report = PassReport {
        iterations: 0,
        converged: slots.is_empty(),
    };

    let Some(finish) = project_finish else {
        // Nothing is scheduled, so there is nothing to propagate.
        report.converged = true;
        return report;
    };

    let has_scheduled_successor: Vec<bool> = (0..slots.len())
        .map(|idx| {
            graph
                .successors_of(idx)
                .iter()
                .any(|&s| slots[s].is_scheduled())
        })
        .collect();

    for (idx, slot) in slots.iter_mut().enumerate() {
        if slot.is_scheduled() && !has_scheduled_successor[idx] {
            slot.late = shift(finish, -(slot.duration - 1)).map(|ls| (ls, finish));
        }
    }

    while report.iterations < cap {
        report.iterations += 1;
        let mut changed = false;

        for &idx in order {
            if !slots[idx].is_scheduled() || !has_scheduled_successor[idx] {
                continue;
            }

            let candidate = graph
                .successors_of(idx)
                .iter()
                .filter_map(|&s| slots[s].late.and_then(|(ls, _)| shift(ls, -1)))
                .fold(None, |acc, d| earlier(acc, Some(d)));

            let Some(lf) = candidate else {
                continue;
            };

            let adopt = match slots[idx].late {
                Some((_, current_lf)) => lf < current_lf,
                None => true,
            };
            if !adopt {
                continue;
            }

            if let Some(ls) = shift(lf, -(slots[idx].duration - 1)) {
                slots[idx].late = Some((ls, lf));
                changed = true;
            }
        }

        debug!(iteration = report.iterations, changed, "backward pass sweep");

        if !changed {
            report.converged = true;
            break;
        }
    }

    report
}

fn finish_row(
    task: &Task,
    idx: usize,
    slot: &Slot,
    graph: &DependencyGraph,
    arena: &TaskArena,
) -> ScheduledTask {
    let (es, ef) = match slot.early {
        Some((es, ef)) => (format_date(es), format_date(ef)),
        None => (task.start.clone(), task.end.clone()),
    };

    let float = match (slot.early, slot.late) {
        (Some((_, ef)), Some((_, lf))) => Some(days_between(ef, lf)),
        _ => None,
    };

    ScheduledTask {
        task: task.clone(),
        index: idx,
        duration: slot.duration,
        es,
        ef,
        ls: slot.late.map(|(ls, _)| format_date(ls)),
        lf: slot.late.map(|(_, lf)| format_date(lf)),
        successors: graph.successor_ids(arena, idx),
        float,
        is_critical: float == Some(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, start: &str, end: &str, deps: &str) -> Task {
        let mut t = Task::new(id, start, end);
        t.dependencies = deps.parse().unwrap();
        t
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let schedule = CpmEngine::default().schedule(&[]);
        assert!(schedule.output.scheduled_tasks.is_empty());
        assert!(schedule.output.critical_task_ids.is_empty());
        assert!(schedule.diagnostics.converged());
        assert_eq!(schedule.diagnostics.project_finish, None);
    }

    #[test]
    fn single_task_is_critical() {
        let out = compute_critical_path(&[task("A", "2024-01-01", "2024-01-01", "")]);
        let a = out.get("A").unwrap();

        assert_eq!(a.duration, 1);
        assert_eq!(a.es, a.ef);
        assert_eq!(a.lf.as_deref(), Some("2024-01-01"));
        assert_eq!(a.float, Some(0));
        assert_eq!(out.critical_task_ids, vec!["A".to_string()]);
    }

    #[test]
    fn declared_start_wins_over_earlier_predecessor_finish() {
        let out = compute_critical_path(&[
            task("A", "2024-01-01", "2024-01-02", ""),
            task("B", "2024-01-10", "2024-01-11", "A"),
        ]);
        let b = out.get("B").unwrap();

        assert_eq!(b.es, "2024-01-10");
        assert_eq!(b.ef, "2024-01-11");
        // A could slip until the day before B's latest start.
        assert_eq!(out.get("A").unwrap().float, Some(7));
    }

    #[test]
    fn unscheduled_rows_pass_through() {
        let out = compute_critical_path(&[task("A", "garbage", "2024-01-02", "")]);
        let a = out.get("A").unwrap();

        assert_eq!(a.duration, 0);
        assert_eq!(a.es, "garbage");
        assert_eq!(a.ef, "2024-01-02");
        assert_eq!(a.ls, None);
        assert_eq!(a.float, None);
        assert!(!a.is_critical);
    }

    #[test]
    fn iteration_factor_is_at_least_one() {
        let engine = CpmEngine::new(ScheduleStrategy::Iterate, 0);
        let schedule = engine.schedule(&[task("A", "2024-01-01", "2024-01-02", "")]);
        assert_eq!(schedule.diagnostics.iteration_cap, 1);
    }

    #[test]
    fn huge_iteration_factor_saturates_the_cap() {
        let engine = CpmEngine::new(ScheduleStrategy::Iterate, usize::MAX / 2);
        let schedule = engine.schedule(&[
            task("A", "2024-01-01", "2024-01-02", ""),
            task("B", "2024-01-01", "2024-01-01", "A"),
            task("C", "2024-01-01", "2024-01-01", "B"),
        ]);

        assert_eq!(schedule.diagnostics.iteration_cap, usize::MAX);
        assert!(schedule.diagnostics.converged());
        assert_eq!(schedule.output.get("C").unwrap().es, "2024-01-04");
    }
}
