use critpath::cpm::{compute_critical_path, CpmEngine};
use critpath::types::ScheduleStrategy;
use critpath_test_utils::builders::{day, task_on, TaskBuilder};

#[test]
fn inverted_span_is_unscheduled_and_never_critical() {
    let tasks = vec![TaskBuilder::new("X").span(&day(5), &day(2)).build()];
    let out = compute_critical_path(&tasks);
    let x = out.get("X").unwrap();

    assert_eq!(x.duration, 0);
    assert_eq!(x.es, day(5));
    assert_eq!(x.ef, day(2));
    assert_eq!(x.float, None);
    assert!(!x.is_critical);
    assert!(out.critical_task_ids.is_empty());
}

#[test]
fn unparsable_dates_do_not_disturb_other_tasks() {
    let tasks = vec![
        task_on("A", 0, 3).build(),
        TaskBuilder::new("Bad").span("next week", "2024-13-45").after("A").build(),
        task_on("B", 0, 2).after("A").build(),
    ];
    let out = compute_critical_path(&tasks);

    assert_eq!(out.scheduled_tasks.len(), 3);

    let bad = out.get("Bad").unwrap();
    assert_eq!(bad.duration, 0);
    assert_eq!(bad.es, "next week");
    assert_eq!(bad.ef, "2024-13-45");
    assert_eq!(bad.lf, None);
    assert!(!bad.is_critical);

    assert_eq!(out.get("B").unwrap().es, day(3));
    assert_eq!(out.critical_task_ids, vec!["A", "B"]);
}

#[test]
fn unscheduled_predecessor_does_not_constrain() {
    let tasks = vec![
        TaskBuilder::new("G").span("", "").build(),
        task_on("B", 4, 2).after("G").build(),
    ];
    let out = compute_critical_path(&tasks);

    assert_eq!(out.get("B").unwrap().es, day(4));
    assert_eq!(out.get("G").unwrap().successors.to_string(), "B");
    assert_eq!(out.critical_task_ids, vec!["B"]);
}

#[test]
fn two_task_cycle_terminates_within_the_cap() {
    let tasks = vec![
        task_on("A", 0, 2).after("B").build(),
        task_on("B", 0, 2).after("A").build(),
    ];
    let schedule = CpmEngine::default().schedule(&tasks);

    assert_eq!(schedule.diagnostics.iteration_cap, 4);
    assert!(schedule.diagnostics.forward_iterations <= 4);
    assert!(!schedule.diagnostics.forward_converged);
    assert_eq!(schedule.output.scheduled_tasks.len(), 2);
    assert!(schedule.output.critical_task_ids.is_empty());
}

#[test]
fn self_dependency_terminates() {
    let tasks = vec![task_on("A", 0, 1).after("A").build()];
    let schedule = CpmEngine::default().schedule(&tasks);

    assert_eq!(schedule.output.scheduled_tasks.len(), 1);
    assert!(!schedule.diagnostics.forward_converged);
}

#[test]
fn topo_first_names_a_task_on_the_cycle() {
    let tasks = vec![
        task_on("Z", 0, 1).build(),
        task_on("A", 0, 2).after("B").build(),
        task_on("B", 0, 2).after("A").build(),
    ];
    let schedule = CpmEngine::new(ScheduleStrategy::TopoFirst, 2).schedule(&tasks);

    let cycle = schedule.diagnostics.cycle_task.as_deref();
    assert!(matches!(cycle, Some("A") | Some("B")), "got {:?}", cycle);
    assert_eq!(schedule.output.scheduled_tasks.len(), 3);
}

#[test]
fn duplicate_ids_keep_every_row() {
    let tasks = vec![task_on("A", 0, 2).build(), task_on("A", 3, 1).build()];
    let out = compute_critical_path(&tasks);

    assert_eq!(out.scheduled_tasks.len(), 2);
    assert_eq!(out.scheduled_tasks[1].index, 1);
}
