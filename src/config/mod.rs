// src/config/mod.rs

//! Plan file loading and validation.
//!
//! Responsibilities:
//! - Define the serde-backed plan model (`model.rs`).
//! - Load a plan from disk as TOML or JSON (`loader.rs`).
//! - Validate the invariants the engine relies on (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_plan_path, load_and_validate, load_from_path, parse_plan, PlanFormat};
pub use model::{ConfigSection, PlanFile, RawPlanFile};
pub use validate::ensure_acyclic;
