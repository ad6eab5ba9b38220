//! Error type for CLI operations

use thiserror::Error;

/// Errors surfaced by CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error while reading the schema or writing output files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input file is not valid JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Schema derivation failed
    #[error("Derivation error: {0}")]
    Derive(#[from] geoschema_core::DeriveError),

    /// Sample generation failed
    #[error("Sample generation error: {0}")]
    Samples(#[from] geoschema_core::SampleError),
}
