//! CLI error types

use thiserror::Error;

use crate::config::ConfigError;
use crate::validation::{SchemaError, ValidationReport};

/// Errors surfaced by CLI commands
///
/// Loader and validator errors are passed through unchanged so the binary can
/// print them verbatim.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Report(#[from] ValidationReport),

    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),

    /// The JSON report has already been written to stdout
    #[error("schema rejected with {0} error(s)")]
    Rejected(usize),
}
