//! Error types for schema derivation

use thiserror::Error;

/// Errors that can occur while deriving FeatureCollection schemas
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeriveError {
    /// A `$ref` without a local fragment (external references are not supported)
    #[error("Unsupported $ref (only document-local references are allowed): {reference}")]
    UnsupportedReference { reference: String },

    /// A `$ref` whose JSON Pointer does not resolve within the document
    #[error("Unresolvable $ref: {reference}")]
    UnresolvedReference { reference: String },

    /// A `$ref` chain that re-enters a reference currently being inlined
    #[error("Cyclic $ref chain re-enters: {reference}")]
    CyclicReference { reference: String },

    /// Top-level input is not an object with a definitions mapping
    #[error("Invalid input document: {0}")]
    InvalidInput(String),
}
