mod common;

use critpath::cpm::{compute_critical_path, CpmEngine};
use critpath::types::ScheduleStrategy;
use critpath_test_utils::builders::{day, task_on};

use common::computed_fields;

fn chain() -> Vec<critpath::Task> {
    // Every task declares day 0; only the dependencies push B and C later.
    vec![
        task_on("A", 0, 5).build(),
        task_on("B", 0, 3).after("A").build(),
        task_on("C", 0, 2).after("B").build(),
    ]
}

#[test]
fn linear_chain_earliest_dates() {
    common::init_tracing();
    let out = compute_critical_path(&chain());

    let a = out.get("A").unwrap();
    let b = out.get("B").unwrap();
    let c = out.get("C").unwrap();

    assert_eq!(a.es, day(0));
    assert_eq!(a.ef, day(4));
    assert_eq!(b.es, day(5));
    assert_eq!(b.ef, day(7));
    assert_eq!(c.es, day(8));
    assert_eq!(c.ef, day(9));
}

#[test]
fn linear_chain_is_entirely_critical() {
    let out = compute_critical_path(&chain());

    for t in &out.scheduled_tasks {
        assert_eq!(t.float, Some(0), "task {} should have zero float", t.id());
        assert!(t.is_critical);
    }
    assert_eq!(out.critical_task_ids, vec!["A", "B", "C"]);

    let a = out.get("A").unwrap();
    assert_eq!(a.ls.as_deref(), Some(day(0).as_str()));
    assert_eq!(a.lf.as_deref(), Some(day(4).as_str()));
    assert_eq!(out.get("C").unwrap().lf.as_deref(), Some(day(9).as_str()));
}

#[test]
fn successors_are_the_inverse_of_dependencies() {
    let out = compute_critical_path(&chain());

    assert_eq!(out.get("A").unwrap().successors.to_string(), "B");
    assert_eq!(out.get("B").unwrap().successors.to_string(), "C");
    assert!(out.get("C").unwrap().successors.is_empty());
}

#[test]
fn reversed_input_reaches_the_same_schedule() {
    let forward = compute_critical_path(&chain());

    let mut reversed = chain();
    reversed.reverse();
    let backward = compute_critical_path(&reversed);

    assert_eq!(computed_fields(&forward), computed_fields(&backward));
    assert_eq!(backward.get("A").unwrap().index, 2);
    // Critical ids follow input order.
    assert_eq!(backward.critical_task_ids, vec!["C", "B", "A"]);
}

#[test]
fn unknown_dependencies_are_ignored() {
    let tasks = vec![
        task_on("A", 0, 2).after("ghost").build(),
        task_on("B", 0, 1).after("A").after("also-missing").build(),
    ];
    let out = compute_critical_path(&tasks);

    assert_eq!(out.get("A").unwrap().es, day(0));
    assert_eq!(out.get("B").unwrap().es, day(2));
    assert_eq!(out.critical_task_ids, vec!["A", "B"]);
}

#[test]
fn topo_first_converges_in_a_single_sweep() {
    let mut tasks = chain();
    tasks.reverse();

    let schedule = CpmEngine::new(ScheduleStrategy::TopoFirst, 2).schedule(&tasks);

    // One sweep to settle, one to confirm nothing changes.
    assert!(schedule.diagnostics.forward_iterations <= 2);
    assert!(schedule.diagnostics.converged());
    assert_eq!(schedule.diagnostics.cycle_task, None);
    assert_eq!(schedule.diagnostics.project_finish.as_deref(), Some(day(9).as_str()));
}

#[test]
fn running_twice_gives_identical_output() {
    let tasks = chain();
    assert_eq!(compute_critical_path(&tasks), compute_critical_path(&tasks));
}
