//! Error types for the conformance harness
//!
//! Scenario failures are data (see `ValidationResult` and `ScenarioOutcome`),
//! not errors. The variants here cover the things that stop a scenario from
//! producing responses at all, plus harness configuration mistakes.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the conformance harness
#[derive(Error, Debug)]
pub enum Error {
    // === Transport Errors ===
    #[error("Failed to spawn server under test: {0}")]
    SpawnFailed(String),

    #[error("Server did not finish within {0:?}")]
    Timeout(std::time::Duration),

    // === Validator Errors ===
    #[error("Unknown schema '{name}'. Known schemas: {known}")]
    UnknownSchema { name: String, known: String },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Invalid scenario file '{path}': {reason}")]
    ScenarioParse { path: String, reason: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an unknown schema error listing the registered names
    pub fn unknown_schema<S: AsRef<str>>(name: &str, known: &[S]) -> Self {
        Self::UnknownSchema {
            name: name.to_string(),
            known: known
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Create a scenario parse error
    pub fn scenario_parse(path: &std::path::Path, reason: impl ToString) -> Self {
        Self::ScenarioParse {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}
