// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! The scheduling core itself never fails; these errors only come out of the
//! shell around it (plan loading, validation, watching).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CritpathError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Cycle detected in dependencies: {0}")]
    DependencyCycle(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CritpathError>;
