//! Error types for sample generation

use thiserror::Error;

use crate::derive::DeriveError;

/// Errors that can occur while generating sample FeatureCollections
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    /// No definition names were supplied
    #[error("No tags provided for sample generation")]
    NoTags,

    /// A requested definition name is absent from the schema document
    #[error("Tag \"{0}\" not found in schema definitions")]
    UnknownTag(String),

    /// The schema document is not an object with a definitions mapping
    #[error("Invalid schema document: {0}")]
    InvalidSchema(String),

    /// A reference inside a definition failed to resolve
    #[error(transparent)]
    Reference(#[from] DeriveError),
}
