//! Scenario errors

use std::path::PathBuf;

use cogbox_core::{ModelError, TermParseError};
use thiserror::Error;

/// Errors raised while loading or building a scenario
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Cannot read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed scenario: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Script '{script}' step {step}: {source}")]
    Payload {
        script: String,
        step: usize,
        #[source]
        source: TermParseError,
    },

    #[error("Buffer '{buffer}' seed {index}: {source}")]
    Seed {
        buffer: String,
        index: usize,
        #[source]
        source: ModelError,
    },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Invalid scenario: {0}")]
    Invalid(String),
}

/// Result type for scenario operations
pub type Result<T> = std::result::Result<T, SimError>;
