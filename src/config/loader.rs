// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{PlanFile, RawPlanFile};
use crate::errors::Result;

/// On-disk encoding of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFormat {
    Toml,
    Json,
}

impl PlanFormat {
    /// `.json` means JSON; anything else is read as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => PlanFormat::Json,
            _ => PlanFormat::Toml,
        }
    }
}

/// Parse plan text without validating it.
pub fn parse_plan(contents: &str, format: PlanFormat) -> Result<RawPlanFile> {
    let plan = match format {
        PlanFormat::Toml => toml::from_str(contents)?,
        PlanFormat::Json => serde_json::from_str(contents)?,
    };
    Ok(plan)
}

/// Load a plan file from a given path and return the raw `RawPlanFile`.
///
/// This only performs deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawPlanFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    parse_plan(&contents, PlanFormat::from_path(path))
}

/// Load a plan file from path and validate it.
///
/// - Reads TOML or JSON.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for duplicate ids, out-of-range progress and a zero
///   iteration factor. Dangling references are only logged.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<PlanFile> {
    let raw = load_from_path(&path)?;
    let plan = PlanFile::try_from(raw)?;
    Ok(plan)
}

/// Default plan location: `Plan.toml` in the current working directory.
pub fn default_plan_path() -> PathBuf {
    PathBuf::from("Plan.toml")
}
