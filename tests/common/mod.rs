#![allow(dead_code)]

use std::collections::BTreeMap;

use critpath::cpm::ScheduleOutput;

/// The per-task fields the engine computes, keyed by id. Leaves out
/// `index`, which legitimately follows input order.
pub type ComputedFields =
    BTreeMap<String, (String, String, Option<String>, Option<String>, Option<i64>, bool)>;

pub fn computed_fields(out: &ScheduleOutput) -> ComputedFields {
    out.scheduled_tasks
        .iter()
        .map(|t| {
            (
                t.task.id.clone(),
                (
                    t.es.clone(),
                    t.ef.clone(),
                    t.ls.clone(),
                    t.lf.clone(),
                    t.float,
                    t.is_critical,
                ),
            )
        })
        .collect()
}

pub use critpath_test_utils::init_tracing;
