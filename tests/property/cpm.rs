#[path = "../common/mod.rs"]
mod common;

use std::collections::BTreeSet;

use common::computed_fields;
use critpath::cpm::CpmEngine;
use critpath::types::ScheduleStrategy;
use critpath::{compute_critical_path, Task};
use critpath_test_utils::builders::task_on;
use proptest::prelude::*;

// Acyclic plans: task N may only depend on tasks 0..N-1, the same trick
// used to keep generated dependency graphs loop-free.
fn dag_plan_strategy(max_tasks: usize) -> impl Strategy<Value = Vec<Task>> {
    (1..=max_tasks).prop_flat_map(|num_tasks| {
        let rows = proptest::collection::vec(
            (
                0..20i64, // start offset
                1..6i64,  // duration
                proptest::collection::vec(any::<usize>(), 0..3),
            ),
            num_tasks,
        );

        rows.prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (start, duration, potential_deps))| {
                    let mut builder = task_on(&format!("task_{i}"), start, duration);
                    let deps: BTreeSet<usize> = if i > 0 {
                        potential_deps.into_iter().map(|d| d % i).collect()
                    } else {
                        BTreeSet::new()
                    };
                    for dep in deps {
                        builder = builder.after(&format!("task_{dep}"));
                    }
                    builder.build()
                })
                .collect()
        })
    })
}

fn shuffled_plan(max_tasks: usize) -> impl Strategy<Value = (Vec<Task>, Vec<Task>)> {
    dag_plan_strategy(max_tasks).prop_flat_map(|tasks| {
        let shuffled = Just(tasks.clone()).prop_shuffle();
        (Just(tasks), shuffled)
    })
}

proptest! {
    #[test]
    fn input_order_does_not_change_results((tasks, shuffled) in shuffled_plan(12)) {
        let a = compute_critical_path(&tasks);
        let b = compute_critical_path(&shuffled);

        prop_assert_eq!(computed_fields(&a), computed_fields(&b));

        let critical_a: BTreeSet<_> = a.critical_task_ids.iter().cloned().collect();
        let critical_b: BTreeSet<_> = b.critical_task_ids.iter().cloned().collect();
        prop_assert_eq!(critical_a, critical_b);
    }

    #[test]
    fn acyclic_plans_converge_with_non_negative_float(tasks in dag_plan_strategy(12)) {
        let schedule = CpmEngine::default().schedule(&tasks);

        prop_assert!(schedule.diagnostics.converged());
        prop_assert!(!schedule.output.critical_task_ids.is_empty());
        for task in &schedule.output.scheduled_tasks {
            prop_assert!(
                task.float.is_some_and(|f| f >= 0),
                "{} has float {:?}",
                task.id(),
                task.float
            );
            prop_assert!(task.es >= task.task.start);
        }
    }

    #[test]
    fn strategies_agree_on_acyclic_plans(tasks in dag_plan_strategy(12)) {
        let iterate = CpmEngine::new(ScheduleStrategy::Iterate, 2).schedule(&tasks);
        let topo = CpmEngine::new(ScheduleStrategy::TopoFirst, 2).schedule(&tasks);

        prop_assert_eq!(iterate.output, topo.output);
        prop_assert!(topo.diagnostics.cycle_task.is_none());
    }

    #[test]
    fn scheduled_dates_are_a_fixed_point(tasks in dag_plan_strategy(12)) {
        let first = compute_critical_path(&tasks);

        // Feed the computed early dates back in as declared dates.
        let replanned: Vec<Task> = first
            .scheduled_tasks
            .iter()
            .map(|t| Task {
                start: t.es.clone(),
                end: t.ef.clone(),
                ..t.task.clone()
            })
            .collect();
        let second = compute_critical_path(&replanned);

        prop_assert_eq!(computed_fields(&first), computed_fields(&second));
        prop_assert_eq!(first.critical_task_ids, second.critical_task_ids);
    }
}
