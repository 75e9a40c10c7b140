// src/hierarchy/visibility.rs

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{Task, TaskArena};
use crate::types::TaskId;

/// Task id -> collapsed. Ids that are absent count as expanded.
pub type CollapseState = BTreeMap<TaskId, bool>;

/// Number of resolved ancestors above `id` (0 for a root or unknown id).
pub fn depth(arena: &TaskArena, id: &str) -> usize {
    arena.ancestors(id).count()
}

/// Whether any ancestor of `id` is collapsed. A collapsed task is itself
/// still visible; only what is below it disappears.
pub fn is_hidden(arena: &TaskArena, id: &str, collapsed: &CollapseState) -> bool {
    arena
        .ancestors(id)
        .any(|a| collapsed.get(&a.id).copied().unwrap_or(false))
}

/// Display metadata for one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityRow {
    pub id: TaskId,
    pub depth: usize,
    pub hidden: bool,
    pub has_children: bool,
    pub collapsed: bool,
}

/// Depth and hidden flag for every task, in input order.
pub fn visibility_rows(tasks: &[Task], collapsed: &CollapseState) -> Vec<VisibilityRow> {
    let arena = TaskArena::from_slice(tasks);

    arena
        .tasks()
        .iter()
        .map(|t| VisibilityRow {
            id: t.id.clone(),
            depth: depth(&arena, &t.id),
            hidden: is_hidden(&arena, &t.id, collapsed),
            has_children: arena.has_children(&t.id),
            collapsed: collapsed.get(&t.id).copied().unwrap_or(false),
        })
        .collect()
}
