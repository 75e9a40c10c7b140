// src/hierarchy/rollup.rs

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::dates::{self, earlier, format_date, later};
use crate::model::{Task, TaskArena};

/// Recompute the span of `parent_id` from its children and keep going up
/// the chain while spans change.
///
/// Called after a direct edit to a task's own dates, with that task's
/// `parentId`. Returns a new list; the input is not modified.
pub fn rollup(parent_id: Option<&str>, tasks: &[Task]) -> Vec<Task> {
    rollup_arena(parent_id, TaskArena::from_slice(tasks)).into_tasks()
}

/// Arena form of [`rollup`].
pub fn rollup_arena(parent_id: Option<&str>, arena: TaskArena) -> TaskArena {
    let mut arena = arena;
    let mut visited: HashSet<String> = HashSet::new();
    let mut current = parent_id
        .filter(|p| !p.trim().is_empty())
        .map(str::to_string);

    while let Some(pid) = current.take() {
        if !visited.insert(pid.clone()) {
            warn!(task = %pid, "cycle in parent chain; stopping rollup");
            break;
        }

        let Some((min_start, max_end)) = children_span(&arena, &pid) else {
            break;
        };
        let Some(parent) = arena.get(&pid) else {
            debug!(task = %pid, "rollup target not found; stopping");
            break;
        };

        let start = min_start
            .map(format_date)
            .unwrap_or_else(|| parent.start.clone());
        let end = max_end.map(format_date).unwrap_or_else(|| parent.end.clone());

        if start == parent.start && end == parent.end {
            break;
        }

        debug!(task = %pid, %start, %end, "rolled up parent span");
        current = parent.parent().map(str::to_string);
        arena = arena.with_span(&pid, &start, &end);
    }

    arena
}

/// Roll up every parent in the list, deepest parents first.
pub fn rollup_all(tasks: &[Task]) -> Vec<Task> {
    let mut arena = TaskArena::from_slice(tasks);

    let mut parents: Vec<(usize, String)> = arena
        .tasks()
        .iter()
        .filter(|t| arena.has_children(&t.id))
        .map(|t| (arena.ancestors(&t.id).count(), t.id.clone()))
        .collect();
    parents.sort_by(|a, b| b.0.cmp(&a.0));

    for (_, pid) in parents {
        arena = rollup_arena(Some(&pid), arena);
    }

    arena.into_tasks()
}

/// `(min child start, max child end)`; each side only considers children
/// whose date parses. `None` when the parent has no children at all, or no
/// child carries a usable date.
fn children_span(
    arena: &TaskArena,
    parent_id: &str,
) -> Option<(Option<NaiveDate>, Option<NaiveDate>)> {
    let mut any_child = false;
    let mut min_start = None;
    let mut max_end = None;

    for child in arena.children_of(parent_id) {
        any_child = true;
        min_start = earlier(min_start, dates::parse_date(&child.start));
        max_end = later(max_end, dates::parse_date(&child.end));
    }

    if !any_child || (min_start.is_none() && max_end.is_none()) {
        return None;
    }
    Some((min_start, max_end))
}
