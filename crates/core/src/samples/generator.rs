//! Deterministic GeoJSON sample generation
//!
//! For each requested definition the generator emits N valid features
//! (every required property populated, enum values cycled across repeated
//! samples) and N structurally adjacent invalid features, each violating
//! exactly one constraint. All randomness flows from a seeded generator,
//! so a given seed, tag list, and schema always produce identical output.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value, json};

use crate::derive::{DeriveError, GeometryKind, parse_geometry_set, resolve_pointer};

use super::error::SampleError;

/// Configuration for sample generation
#[derive(Debug, Clone, Copy)]
pub struct SampleConfig {
    /// Seed for the reproducible random stream
    pub seed: u64,
    /// Number of feature pairs generated per tag
    pub features_per_tag: usize,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            features_per_tag: 1,
        }
    }
}

/// A matched pair of FeatureCollections: `invalid.features[i]` is the
/// broken sibling of `valid.features[i]`
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    pub valid: Value,
    pub invalid: Value,
}

/// Seeded GeoJSON sample generator
pub struct SampleGenerator {
    config: SampleConfig,
}

impl SampleGenerator {
    /// Create a generator with the default configuration
    pub fn new() -> Self {
        Self::with_config(SampleConfig::default())
    }

    /// Create a generator with a custom configuration
    pub fn with_config(config: SampleConfig) -> Self {
        Self { config }
    }

    /// Generate valid and invalid FeatureCollections for the given
    /// definition names.
    ///
    /// Each invalid feature violates exactly one constraint relative to the
    /// valid feature at the same index, rotated by sample index: an
    /// out-of-enum value for a required enumerated field, a dropped
    /// required field, or a flipped geometry type.
    pub fn generate(&self, document: &Value, tags: &[String]) -> Result<SampleSet, SampleError> {
        if tags.is_empty() {
            return Err(SampleError::NoTags);
        }

        let definitions = document
            .as_object()
            .and_then(|root| root.get("definitions").or_else(|| root.get("$defs")))
            .and_then(Value::as_object)
            .ok_or_else(|| {
                SampleError::InvalidSchema("missing a definitions mapping".to_string())
            })?;

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut valid = Vec::new();
        let mut invalid = Vec::new();

        for (tag_index, tag) in tags.iter().enumerate() {
            let definition = definitions
                .get(tag)
                .ok_or_else(|| SampleError::UnknownTag(tag.clone()))?;

            let kind = infer_geometry_kind(definition, document);
            let fields = field_schema(definition, document)?;

            let required: Vec<String> = fields
                .and_then(|f| f.get("required"))
                .and_then(Value::as_array)
                .map(|names| {
                    names
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            let properties = fields
                .and_then(|f| f.get("properties"))
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();

            // Resolve each required property's schema up front; enum-bearing
            // ones are the preferred invalidation targets.
            let mut required_schemas = Vec::with_capacity(required.len());
            for name in &required {
                let schema = match properties.get(name) {
                    Some(node) => deref(document, node)?.clone(),
                    None => Value::Object(Map::new()),
                };
                required_schemas.push((name.clone(), schema));
            }
            let enum_required: Vec<String> = required_schemas
                .iter()
                .filter(|(_, schema)| {
                    schema
                        .get("enum")
                        .and_then(Value::as_array)
                        .is_some_and(|values| !values.is_empty())
                })
                .map(|(name, _)| name.clone())
                .collect();

            for sample_index in 0..self.config.features_per_tag {
                let mut props = Map::new();
                for (name, schema) in &required_schemas {
                    props.insert(name.clone(), sample_value(name, schema, sample_index, &mut rng));
                }

                // Stable identifiers regardless of schema specifics
                for (key, prefix) in [("_id", "id"), ("_u_id", "node-u"), ("_v_id", "node-v")] {
                    if props.contains_key(key) {
                        props.insert(
                            key.to_string(),
                            json!(format!(
                                "{prefix}-{}-{tag_index}-{sample_index}",
                                tag.to_lowercase()
                            )),
                        );
                    }
                }

                let feature = json!({
                    "type": "Feature",
                    "geometry": {
                        "type": kind.type_name(),
                        "coordinates": coordinates_for(kind, &mut rng)
                    },
                    "properties": Value::Object(props)
                });

                let broken =
                    self.break_feature(&feature, kind, &required, &enum_required, sample_index, &mut rng);

                valid.push(feature);
                invalid.push(broken);
            }
        }

        Ok(SampleSet {
            valid: json!({ "type": "FeatureCollection", "features": valid }),
            invalid: json!({ "type": "FeatureCollection", "features": invalid }),
        })
    }

    /// Clone a valid feature and violate exactly one of its constraints
    fn break_feature(
        &self,
        feature: &Value,
        kind: GeometryKind,
        required: &[String],
        enum_required: &[String],
        sample_index: usize,
        rng: &mut StdRng,
    ) -> Value {
        let mut broken = feature.clone();

        if !enum_required.is_empty() {
            // Rotate through the enumerated fields so repeated samples break
            // different ones
            let target = &enum_required[sample_index % enum_required.len()];
            broken["properties"][target.as_str()] =
                json!(format!("__INVALID_ENUM__{sample_index}"));
        } else if !required.is_empty() {
            let target = &required[sample_index % required.len()];
            if let Some(props) = broken["properties"].as_object_mut() {
                props.shift_remove(target);
            }
        } else {
            let flipped = match kind {
                GeometryKind::Point => GeometryKind::LineString,
                GeometryKind::LineString => GeometryKind::Point,
                _ => GeometryKind::Point,
            };
            broken["geometry"]["type"] = json!(flipped.type_name());
            broken["geometry"]["coordinates"] = coordinates_for(flipped, rng);
        }

        // Keep surviving identifiers distinguishable from the valid sibling
        for key in ["_id", "_u_id", "_v_id"] {
            if let Some(Value::String(id)) = broken["properties"].get_mut(key) {
                id.push_str("-bad");
            }
        }

        broken
    }
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the top-level `$ref` of a node, if any
fn deref<'a>(document: &'a Value, node: &'a Value) -> Result<&'a Value, DeriveError> {
    match node.get("$ref").and_then(Value::as_str) {
        Some(reference) => resolve_pointer(document, reference),
        None => Ok(node),
    }
}

/// Determine a definition's geometry kind: dereference its geometry `$ref`
/// and read the `type` enum, falling back to parsing the reference string,
/// then to Point.
fn infer_geometry_kind(definition: &Value, document: &Value) -> GeometryKind {
    let Some(node) = definition.pointer("/properties/geometry") else {
        return GeometryKind::Point;
    };

    if let Some(reference) = node.get("$ref").and_then(Value::as_str) {
        if let Ok(target) = resolve_pointer(document, reference)
            && let Some(kind) = enum_kind(target)
        {
            return kind;
        }
        if let Some(kind) = parse_geometry_set(reference).into_iter().next() {
            return kind;
        }
    }

    enum_kind(node).unwrap_or(GeometryKind::Point)
}

/// Read `properties.type.enum[0]` of a geometry schema as a kind
fn enum_kind(schema: &Value) -> Option<GeometryKind> {
    schema
        .pointer("/properties/type/enum")?
        .as_array()?
        .first()?
        .as_str()
        .and_then(GeometryKind::parse)
}

/// Resolve the definition's field sub-schema (`properties.properties`)
fn field_schema<'a>(
    definition: &'a Value,
    document: &'a Value,
) -> Result<Option<&'a Value>, SampleError> {
    match definition.pointer("/properties/properties") {
        Some(node) => Ok(Some(deref(document, node)?)),
        None => Ok(None),
    }
}

/// Synthesize a value for one property: cycle enum values by sample index,
/// otherwise fall back to type-driven sampling
fn sample_value(name: &str, schema: &Value, index: usize, rng: &mut StdRng) -> Value {
    if let Some(values) = schema.get("enum").and_then(Value::as_array)
        && !values.is_empty()
    {
        return values[index % values.len()].clone();
    }
    sample_by_type(name, schema, index, rng)
}

fn sample_by_type(name: &str, schema: &Value, index: usize, rng: &mut StdRng) -> Value {
    let type_name = match schema.get("type") {
        Some(Value::String(t)) => t.as_str(),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null")
            .or_else(|| types.first().and_then(Value::as_str))
            .unwrap_or("string"),
        _ => "string",
    };

    match type_name {
        "string" => match name {
            "_id" => json!(format!("id-{index:04}")),
            "_u_id" => json!(format!("node-u-{index:04}")),
            "_v_id" => json!(format!("node-v-{index:04}")),
            "name" => json!(format!("Example Name {}", index + 1)),
            _ => json!(format!("example-{index}")),
        },
        "number" => {
            let min = schema.get("minimum").and_then(Value::as_f64).unwrap_or(0.0);
            let max = schema
                .get("maximum")
                .and_then(Value::as_f64)
                .unwrap_or(min + 10.0);
            let value = min + (max - min) * rng.gen_range(0.0..1.0);
            json!((value * 1000.0).round() / 1000.0)
        }
        "integer" => {
            let min = schema.get("minimum").and_then(Value::as_f64).unwrap_or(0.0);
            let max = schema
                .get("maximum")
                .and_then(Value::as_f64)
                .unwrap_or(min + 10.0);
            json!((min + (max - min) * rng.gen_range(0.0..1.0)).floor() as i64)
        }
        "boolean" => json!(rng.gen_range(0.0..1.0) > 0.5),
        "array" => sample_array(schema, index, rng),
        "object" => json!({}),
        _ => json!(format!("example-{index}")),
    }
}

fn sample_array(schema: &Value, index: usize, rng: &mut StdRng) -> Value {
    let count = 1 + (rng.gen_range(0.0..1.0) * 2.0_f64).floor() as usize;
    let item_type = schema
        .pointer("/items/type")
        .and_then(Value::as_str)
        .unwrap_or("");
    match item_type {
        "string" => {
            let items: Vec<Value> = (0..count)
                .map(|k| json!(format!("ex-{index}-{k}")))
                .collect();
            Value::Array(items)
        }
        "number" => {
            let items: Vec<Value> = (0..count)
                .map(|_| json!((rng.gen_range(0.0..1.0) * 1000.0_f64).round() / 100.0))
                .collect();
            Value::Array(items)
        }
        _ => json!([]),
    }
}

/// Deterministic coordinates inside a small fixed bounding box, shaped per
/// geometry kind
fn coordinates_for(kind: GeometryKind, rng: &mut StdRng) -> Value {
    let lon = -122.35 + rng.gen_range(0.0..1.0) * 0.05;
    let lat = 47.60 + rng.gen_range(0.0..1.0) * 0.02;

    match kind {
        GeometryKind::Point => json!([lon, lat]),
        GeometryKind::LineString => {
            let dx = 0.001 + rng.gen_range(0.0..1.0) * 0.001;
            let dy = 0.001 + rng.gen_range(0.0..1.0) * 0.001;
            json!([[lon, lat], [lon + dx, lat + dy]])
        }
        GeometryKind::Polygon => json!([ring(lon, lat, rng)]),
        GeometryKind::MultiPolygon => json!([[ring(lon, lat, rng)]]),
    }
}

/// A closed rectangular ring anchored at the given corner
fn ring(lon: f64, lat: f64, rng: &mut StdRng) -> Value {
    let dx = 0.0008 + rng.gen_range(0.0..1.0) * 0.0006;
    let dy = 0.0008 + rng.gen_range(0.0..1.0) * 0.0006;
    json!([
        [lon, lat],
        [lon + dx, lat],
        [lon + dx, lat + dy],
        [lon, lat + dy],
        [lon, lat]
    ])
}
