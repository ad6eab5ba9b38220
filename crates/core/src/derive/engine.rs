//! Schema derivation pipeline

use serde_json::Value;

use super::config::DeriveConfig;
use super::dependencies::synthesize_dependencies;
use super::emit::feature_collection_schema;
use super::error::DeriveError;
use super::extract::{FieldDefinition, extract_definitions};
use super::geometry::{GeometryKind, classify_definitions, polygon_kinds};
use super::merge::aggregate_properties;

/// The derived FeatureCollection schemas, one per non-empty geometry group
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSchemas {
    /// Schema for LineString features, if any definition validates one
    pub line_string: Option<Value>,
    /// Schema for Point features
    pub point: Option<Value>,
    /// Schema for Polygon and/or MultiPolygon features
    pub polygon_like: Option<Value>,
}

impl DerivedSchemas {
    /// True when no geometry group produced a schema
    pub fn is_empty(&self) -> bool {
        self.line_string.is_none() && self.point.is_none() && self.polygon_like.is_none()
    }
}

/// Schema derivation engine
///
/// Runs the full pipeline over a schema document: extract Feature-shaped
/// definitions, classify them by geometry kind, and per group aggregate
/// property schemas, synthesize dependency rules, and emit a
/// FeatureCollection schema. The engine holds only configuration; every
/// call consumes immutable inputs and returns fresh values.
pub struct SchemaDeriver {
    config: DeriveConfig,
}

impl SchemaDeriver {
    /// Create a deriver with the default configuration
    pub fn new() -> Self {
        Self::with_config(DeriveConfig::default())
    }

    /// Create a deriver with a custom configuration
    pub fn with_config(config: DeriveConfig) -> Self {
        Self { config }
    }

    /// Extract the resolved field definitions from a document without
    /// deriving schemas. This is the intermediate interface consumed by the
    /// sample generator and the raw results dump.
    pub fn extract(&self, document: &Value) -> Result<Vec<FieldDefinition>, DeriveError> {
        extract_definitions(document)
    }

    /// Derive the per-group FeatureCollection schemas for a document
    pub fn derive(&self, document: &Value) -> Result<DerivedSchemas, DeriveError> {
        let definitions = self.extract(document)?;
        Ok(self.derive_from_definitions(definitions))
    }

    /// Derive schemas from an already extracted definition list
    pub fn derive_from_definitions(&self, definitions: Vec<FieldDefinition>) -> DerivedSchemas {
        let groups = classify_definitions(definitions);
        tracing::debug!(
            line_strings = groups.line_strings.len(),
            points = groups.points.len(),
            polygon_like = groups.polygon_like.len(),
            "classified definitions"
        );

        let polygon_group_kinds = {
            let kinds = polygon_kinds(&groups.polygon_like);
            if kinds.is_empty() { vec![GeometryKind::Polygon] } else { kinds }
        };

        DerivedSchemas {
            line_string: self.build_group(&groups.line_strings, &[GeometryKind::LineString]),
            point: self.build_group(&groups.points, &[GeometryKind::Point]),
            polygon_like: self.build_group(&groups.polygon_like, &polygon_group_kinds),
        }
    }

    /// Aggregate and emit one geometry group; empty groups produce nothing
    fn build_group(
        &self,
        definitions: &[FieldDefinition],
        kinds: &[GeometryKind],
    ) -> Option<Value> {
        if definitions.is_empty() {
            return None;
        }

        let definitions: Vec<FieldDefinition> = definitions
            .iter()
            .map(|definition| self.renamed(definition))
            .collect();

        let properties = aggregate_properties(&definitions);
        let dependencies = synthesize_dependencies(&definitions, &self.config.discriminators);
        Some(feature_collection_schema(kinds, properties, dependencies))
    }

    /// Apply the configured property renames to a copy of the definition
    fn renamed(&self, definition: &FieldDefinition) -> FieldDefinition {
        let mut definition = definition.clone();
        for (from, to) in &self.config.renames {
            if from == to {
                continue;
            }
            if let Some(schema) = definition.properties.shift_remove(from) {
                definition.properties.insert(to.clone(), schema);
            }
        }
        definition
    }
}

impl Default for SchemaDeriver {
    fn default() -> Self {
        Self::new()
    }
}
