// src/model/mod.rs

//! Task graph data model.
//!
//! - [`task`] holds the externally owned `Task` record.
//! - [`dependencies`] parses the comma-joined dependency field into an
//!   ordered id set (and joins it back on the way out).
//! - [`arena`] gives id-indexed, parent-indexed lookups over an ordered task
//!   list, with "mutation" expressed as producing a new arena.

pub mod arena;
pub mod dependencies;
pub mod task;

pub use arena::{Ancestors, TaskArena};
pub use dependencies::DependencySet;
pub use task::Task;
