// src/hierarchy/mod.rs

//! Parent/child structure over the flat task list.
//!
//! - [`rollup`] widens a parent's span to cover its children, walking up.
//! - [`visibility`] derives indentation depth and hidden flags from the
//!   collapse state. It is display-only and never touches the task list.

pub mod rollup;
pub mod visibility;

pub use rollup::{rollup, rollup_all, rollup_arena};
pub use visibility::{depth, is_hidden, visibility_rows, CollapseState, VisibilityRow};
