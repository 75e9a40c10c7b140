// src/model/arena.rs

//! Id-indexed storage over an ordered task list.
//!
//! The hierarchy is never stored as back-pointers: parents are found by
//! looking up `parentId` in the id index, children through a parent-keyed
//! index built once per arena. Nothing here mutates in place; updates go
//! through [`TaskArena::with_span`], which returns a new arena.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::model::task::Task;
use crate::types::TaskId;

#[derive(Debug, Clone, Default)]
pub struct TaskArena {
    tasks: Vec<Task>,
    by_id: HashMap<TaskId, usize>,
    children: HashMap<TaskId, Vec<usize>>,
}

impl TaskArena {
    /// Index an ordered task list. If an id repeats, lookups resolve to its
    /// first occurrence; every row is still kept.
    pub fn new(tasks: Vec<Task>) -> Self {
        let mut by_id: HashMap<TaskId, usize> = HashMap::with_capacity(tasks.len());
        let mut children: HashMap<TaskId, Vec<usize>> = HashMap::new();

        for (idx, task) in tasks.iter().enumerate() {
            if by_id.contains_key(&task.id) {
                warn!(task = %task.id, index = idx, "duplicate task id; lookups use the first row");
            } else {
                by_id.insert(task.id.clone(), idx);
            }

            if let Some(parent) = task.parent() {
                children.entry(parent.to_string()).or_default().push(idx);
            }
        }

        Self {
            tasks,
            by_id,
            children,
        }
    }

    pub fn from_slice(tasks: &[Task]) -> Self {
        Self::new(tasks.to_vec())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.position(id).map(|idx| &self.tasks[idx])
    }

    /// Input position of the row that owns `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Direct children of `parent_id`, in input order.
    pub fn children_of<'a>(&'a self, parent_id: &str) -> impl Iterator<Item = &'a Task> + 'a {
        self.children
            .get(parent_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&idx| &self.tasks[idx])
    }

    pub fn has_children(&self, id: &str) -> bool {
        self.children.get(id).is_some_and(|v| !v.is_empty())
    }

    /// Walk up the `parentId` chain of `id`, nearest ancestor first.
    pub fn ancestors<'a>(&'a self, id: &str) -> Ancestors<'a> {
        let mut visited = HashSet::new();
        visited.insert(id.to_string());
        Ancestors {
            arena: self,
            next: self.get(id).and_then(|t| t.parent()),
            visited,
        }
    }

    /// Copy of this arena with the span of `id` replaced.
    ///
    /// Returns an unchanged copy when `id` is unknown.
    pub fn with_span(&self, id: &str, start: &str, end: &str) -> TaskArena {
        let mut next = self.clone();
        if let Some(idx) = self.position(id) {
            let task = &mut next.tasks[idx];
            task.start = start.to_string();
            task.end = end.to_string();
        }
        next
    }
}

/// Iterator over the resolved ancestors of a task.
///
/// Stops at the first `parentId` that names no task, and at the first task
/// it has already visited (a malformed cyclic chain).
pub struct Ancestors<'a> {
    arena: &'a TaskArena,
    next: Option<&'a str>,
    visited: HashSet<String>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Task;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        if !self.visited.insert(id.to_string()) {
            warn!(task = %id, "cycle in parent chain; stopping walk");
            return None;
        }
        let task = self.arena.get(id)?;
        self.next = task.parent();
        Some(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(id: &str, parent: &str) -> Task {
        let mut t = Task::new(id, "2024-01-01", "2024-01-02");
        t.parent_id = Some(parent.to_string());
        t
    }

    #[test]
    fn children_are_listed_in_input_order() {
        let arena = TaskArena::new(vec![
            Task::new("P", "2024-01-01", "2024-01-02"),
            child("B", "P"),
            child("A", "P"),
        ]);

        let ids: Vec<_> = arena.children_of("P").map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
        assert!(arena.has_children("P"));
        assert!(!arena.has_children("A"));
    }

    #[test]
    fn ancestors_stop_at_missing_parent() {
        let arena = TaskArena::new(vec![child("A", "P"), child("P", "ghost")]);
        let ids: Vec<_> = arena.ancestors("A").map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["P"]);
    }

    #[test]
    fn ancestors_stop_on_parent_cycle() {
        let arena = TaskArena::new(vec![child("A", "B"), child("B", "A")]);
        let ids: Vec<_> = arena.ancestors("A").map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["B"]);
    }

    #[test]
    fn with_span_leaves_the_original_untouched() {
        let arena = TaskArena::new(vec![Task::new("A", "2024-01-01", "2024-01-02")]);
        let next = arena.with_span("A", "2024-02-01", "2024-02-03");

        assert_eq!(arena.get("A").unwrap().start, "2024-01-01");
        assert_eq!(next.get("A").unwrap().end, "2024-02-03");
    }
}
