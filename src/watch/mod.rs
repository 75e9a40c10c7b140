// src/watch/mod.rs

//! `--watch` mode: re-plan whenever the plan file changes.
//!
//! - [`watcher`] wires a cross-platform filesystem watcher (`notify`) to a
//!   Tokio channel, filtered down to the plan file.
//! - [`hash`] fingerprints file contents so saves that did not change
//!   anything (editor touch, format-on-save no-ops) are skipped.
//! - [`runtime`] is the async loop that reads, validates and re-plans.
//!
//! The scheduling itself stays synchronous inside [`crate::session`].

pub mod hash;
pub mod runtime;
pub mod watcher;

pub use hash::{content_hash, ContentGate};
pub use runtime::{WatchEvent, WatchOptions, WatchRuntime};
pub use watcher::{spawn_plan_watcher, WatcherHandle};
