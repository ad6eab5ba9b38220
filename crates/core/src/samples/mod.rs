//! Deterministic GeoJSON sample generation
//!
//! Consumes the same schema document as the derivation engine and produces
//! paired valid/invalid FeatureCollections for a list of definition names.
//! Output is fully reproducible: the same seed, tag list, and schema yield
//! byte-identical results.
//!
//! ## Example
//!
//! ```rust,ignore
//! use geoschema_core::samples::{SampleConfig, SampleGenerator};
//!
//! let generator = SampleGenerator::with_config(SampleConfig {
//!     seed: 42,
//!     features_per_tag: 2,
//! });
//! let samples = generator.generate(&document, &tags)?;
//! std::fs::write("valid.geojson", serde_json::to_string_pretty(&samples.valid)?)?;
//! ```

mod error;
mod generator;

pub use error::SampleError;
pub use generator::{SampleConfig, SampleGenerator, SampleSet};
