// src/cpm/mod.rs

//! Critical Path Method scheduling.
//!
//! - [`graph`] links predecessors and successors by row, dropping unknown ids.
//! - [`order`] decides the traversal order (input order, or topological when
//!   the `topo-first` strategy is selected and the graph is acyclic).
//! - [`engine`] runs the forward/backward passes to a fixed point.
//! - [`output`] holds the enriched task rows and the run diagnostics.

pub mod engine;
pub mod graph;
pub mod order;
pub mod output;

pub use engine::{compute_critical_path, CpmEngine, DEFAULT_ITERATION_FACTOR};
pub use graph::DependencyGraph;
pub use order::{topological_order, Traversal};
pub use output::{Schedule, ScheduleDiagnostics, ScheduleOutput, ScheduledTask};
