// src/cpm/graph.rs

use tracing::debug;

use crate::model::{DependencySet, TaskArena};

/// Predecessor/successor adjacency keyed by input row.
///
/// Built from the free-text `dependencies` of each task. References to ids
/// that name no task are dropped here, so the passes only ever see edges
/// between real rows.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    predecessors: Vec<Vec<usize>>,
    successors: Vec<Vec<usize>>,
}

impl DependencyGraph {
    pub fn from_arena(arena: &TaskArena) -> Self {
        let n = arena.len();
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (idx, task) in arena.tasks().iter().enumerate() {
            for dep in task.dependencies.iter() {
                match arena.position(dep) {
                    Some(pred) => {
                        if !predecessors[idx].contains(&pred) {
                            predecessors[idx].push(pred);
                        }
                        if !successors[pred].contains(&idx) {
                            successors[pred].push(idx);
                        }
                    }
                    None => {
                        debug!(task = %task.id, dep = %dep, "unknown dependency; ignoring");
                    }
                }
            }
        }

        Self {
            predecessors,
            successors,
        }
    }

    pub fn len(&self) -> usize {
        self.predecessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predecessors.is_empty()
    }

    /// Rows this row depends on.
    pub fn predecessors_of(&self, idx: usize) -> &[usize] {
        self.predecessors.get(idx).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Rows that depend on this row.
    pub fn successors_of(&self, idx: usize) -> &[usize] {
        self.successors.get(idx).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Successor ids of a row, as they appear on the scheduled output.
    pub fn successor_ids(&self, arena: &TaskArena, idx: usize) -> DependencySet {
        self.successors_of(idx)
            .iter()
            .map(|&s| arena.tasks()[s].id.clone())
            .collect()
    }

    /// All edges as `(predecessor, successor)` row pairs.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.successors
            .iter()
            .enumerate()
            .flat_map(|(pred, succs)| succs.iter().map(move |&s| (pred, s)))
    }
}
