//! Geoschema Core - schema derivation for tagged geographic feature types
//!
//! Provides the building blocks for turning one hierarchical JSON Schema
//! document of tagged feature types into per-geometry GeoJSON
//! `FeatureCollection` schemas:
//! - Document-local `$ref` resolution and inlining
//! - Feature-shaped definition extraction and geometry classification
//! - Property aggregation and conditional dependency synthesis
//! - FeatureCollection schema emission
//! - Deterministic valid/invalid sample generation

pub mod derive;
pub mod samples;

// Re-export commonly used types
pub use derive::{
    DeriveConfig, DeriveConfigBuilder, DeriveError, DerivedSchemas, FieldDefinition, GeometryKind,
    SchemaDeriver,
};
pub use samples::{SampleConfig, SampleError, SampleGenerator, SampleSet};
