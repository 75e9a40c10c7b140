// src/cpm/order.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, warn};

use crate::cpm::graph::DependencyGraph;
use crate::types::ScheduleStrategy;

/// Row visiting order for the two passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    /// Order for the forward (earliest dates) pass.
    pub forward: Vec<usize>,
    /// Order for the backward (latest dates) pass.
    pub backward: Vec<usize>,
    /// A row found on a dependency cycle, if the topological sort failed.
    pub cycle_row: Option<usize>,
}

impl Traversal {
    /// Input order forward, reverse input order backward.
    pub fn input_order(n: usize) -> Self {
        Self {
            forward: (0..n).collect(),
            backward: (0..n).rev().collect(),
            cycle_row: None,
        }
    }

    pub fn for_strategy(strategy: ScheduleStrategy, graph: &DependencyGraph) -> Self {
        match strategy {
            ScheduleStrategy::Iterate => Self::input_order(graph.len()),
            ScheduleStrategy::TopoFirst => match topological_order(graph) {
                Ok(order) => {
                    debug!(
                        rows = order.len(),
                        "dependency graph is acyclic; using topological order"
                    );
                    let backward = order.iter().rev().copied().collect();
                    Self {
                        forward: order,
                        backward,
                        cycle_row: None,
                    }
                }
                Err(row) => {
                    warn!(row, "dependency cycle detected; falling back to bounded iteration");
                    Self {
                        cycle_row: Some(row),
                        ..Self::input_order(graph.len())
                    }
                }
            },
        }
    }
}

/// Topologically sort the rows of `graph` (predecessors first).
///
/// On failure returns a row that lies on a cycle. Self-dependencies count as
/// cycles.
pub fn topological_order(graph: &DependencyGraph) -> Result<Vec<usize>, usize> {
    // Edge direction: predecessor -> successor.
    let mut g: DiGraphMap<usize, ()> = DiGraphMap::new();

    for idx in 0..graph.len() {
        g.add_node(idx);
    }
    for (pred, succ) in graph.edges() {
        if pred == succ {
            return Err(pred);
        }
        g.add_edge(pred, succ, ());
    }

    toposort(&g, None).map_err(|cycle| cycle.node_id())
}
