//! Schema resolution and aggregation engine
//!
//! Derives, per geometry class, a JSON Schema that validates a GeoJSON
//! `FeatureCollection` from a single hierarchical schema document of tagged
//! feature types.
//!
//! ## Pipeline
//!
//! - **Reference resolution** - recursive `$ref` inlining with sibling-key
//!   override semantics and cycle detection
//! - **Extraction** - pairs each Feature-shaped definition with its
//!   geometry tag and fully inlined field sub-schema
//! - **Classification** - buckets definitions into LineString, Point, and
//!   Polygon-like groups
//! - **Aggregation** - merges property schemas within a group (enum union,
//!   bound widening)
//! - **Dependency synthesis** - turns single-valued discriminator tags into
//!   conditional `dependencies` rules
//! - **Emission** - wraps each group into a strict FeatureCollection schema
//!
//! ## Example
//!
//! ```rust,ignore
//! use geoschema_core::derive::SchemaDeriver;
//!
//! let document: serde_json::Value = serde_json::from_str(&schema_json)?;
//! let derived = SchemaDeriver::new().derive(&document)?;
//! if let Some(schema) = derived.line_string {
//!     println!("{}", serde_json::to_string_pretty(&schema)?);
//! }
//! ```

mod config;
mod dependencies;
mod emit;
mod engine;
mod error;
mod extract;
mod geometry;
mod merge;
mod resolver;

pub use config::{DEFAULT_DISCRIMINATORS, DeriveConfig, DeriveConfigBuilder};
pub use dependencies::{discriminator_clauses, synthesize_dependencies};
pub use emit::{feature_collection_schema, geometry_schema};
pub use engine::{DerivedSchemas, SchemaDeriver};
pub use error::DeriveError;
pub use extract::{FieldDefinition, extract_definitions};
pub use geometry::{
    GeometryGroups, GeometryKind, classify_definitions, parse_geometry_set, polygon_kinds,
};
pub use merge::{aggregate_properties, merge_property};
pub use resolver::{inline_refs, last_pointer_segment, resolve_pointer};
