//! Property schema aggregation
//!
//! Folds the property schemas of every definition in a geometry group into
//! one merged mapping. The policy accepts the loosest constraint compatible
//! with any contributing definition: enums union, numeric and length bounds
//! widen, and a missing description is backfilled from later contributors.

use serde_json::{Map, Value};

use super::extract::FieldDefinition;

/// Aggregate the property schemas of `definitions`, in sequence order, into
/// a single property-name to schema mapping.
///
/// The first occurrence of a property establishes its base schema as a deep
/// copy; every later occurrence folds into it via [`merge_property`].
/// Non-object property schemas are ignored.
pub fn aggregate_properties(definitions: &[FieldDefinition]) -> Map<String, Value> {
    let mut aggregated = Map::new();

    for definition in definitions {
        for (name, schema) in &definition.properties {
            if !schema.is_object() {
                continue;
            }
            match aggregated.get_mut(name) {
                Some(slot) => {
                    let current = slot.take();
                    *slot = merge_property(current, schema.clone());
                }
                None => {
                    aggregated.insert(name.clone(), schema.clone());
                }
            }
        }
    }

    aggregated
}

/// Merge one property schema fragment into the accumulated fragment,
/// returning the new accumulator.
///
/// Keeps the first-seen `type` when the two fragments disagree; widening to
/// a type union was considered and rejected to match the established output
/// shape, so a conflict is only surfaced at debug level.
pub fn merge_property(current: Value, incoming: Value) -> Value {
    let (mut current, incoming) = match (current, incoming) {
        (Value::Object(current), Value::Object(incoming)) => (current, incoming),
        // Callers only feed object fragments; anything else passes through.
        (current, _) => return current,
    };

    if let (Some(a), Some(b)) = (current.get("type"), incoming.get("type"))
        && a != b
    {
        tracing::debug!(current = %a, incoming = %b, "conflicting property types, keeping first");
    }

    if current.contains_key("enum") || incoming.contains_key("enum") {
        let union = merge_enums(current.get("enum"), incoming.get("enum"));
        current.insert("enum".to_string(), Value::Array(union));
        if !current.contains_key("type") {
            let fallback = incoming
                .get("type")
                .cloned()
                .unwrap_or_else(|| Value::String("string".to_string()));
            current.insert("type".to_string(), fallback);
        }
    }

    widen_bounds(&mut current, &incoming, "minimum", "maximum");
    widen_bounds(&mut current, &incoming, "minLength", "maxLength");

    if !current.contains_key("description")
        && let Some(description) = incoming.get("description")
    {
        current.insert("description".to_string(), description.clone());
    }

    Value::Object(current)
}

/// Union two enum arrays, keeping first-appearance order and dropping
/// duplicates.
fn merge_enums(current: Option<&Value>, incoming: Option<&Value>) -> Vec<Value> {
    let mut union = Vec::new();
    for source in [current, incoming] {
        let Some(Value::Array(values)) = source else {
            continue;
        };
        for value in values {
            if !union.contains(value) {
                union.push(value.clone());
            }
        }
    }
    union
}

/// Widen a min/max bound pair: the merged minimum is the smaller of the two
/// minimums, the merged maximum the larger of the two maximums.
fn widen_bounds(
    current: &mut Map<String, Value>,
    incoming: &Map<String, Value>,
    min_key: &str,
    max_key: &str,
) {
    if let Some(incoming_min) = incoming.get(min_key).filter(|v| v.is_number()) {
        let widened = match current.get(min_key).and_then(Value::as_f64) {
            Some(existing) if existing <= as_f64(incoming_min) => current[min_key].clone(),
            _ => incoming_min.clone(),
        };
        current.insert(min_key.to_string(), widened);
    }
    if let Some(incoming_max) = incoming.get(max_key).filter(|v| v.is_number()) {
        let widened = match current.get(max_key).and_then(Value::as_f64) {
            Some(existing) if existing >= as_f64(incoming_max) => current[max_key].clone(),
            _ => incoming_max.clone(),
        };
        current.insert(max_key.to_string(), widened);
    }
}

fn as_f64(value: &Value) -> f64 {
    value.as_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn definition(properties: Value) -> FieldDefinition {
        FieldDefinition {
            properties: properties.as_object().cloned().unwrap_or_default(),
            required: Vec::new(),
            geometry_type: "GeoJSON.LineString".to_string(),
            item_name: "TestFields".to_string(),
        }
    }

    #[test]
    fn test_first_occurrence_establishes_schema() {
        let defs = vec![definition(json!({
            "surface": { "type": "string", "description": "road surface" }
        }))];

        let merged = aggregate_properties(&defs);
        assert_eq!(
            merged["surface"],
            json!({ "type": "string", "description": "road surface" })
        );
    }

    #[test]
    fn test_enum_union_preserves_first_appearance_order() {
        let defs = vec![
            definition(json!({ "surface": { "type": "string", "enum": ["asphalt", "gravel"] } })),
            definition(json!({ "surface": { "type": "string", "enum": ["gravel", "paved"] } })),
        ];

        let merged = aggregate_properties(&defs);
        assert_eq!(merged["surface"]["enum"], json!(["asphalt", "gravel", "paved"]));
    }

    #[test]
    fn test_enum_union_is_commutative_as_a_set() {
        let a = definition(json!({ "surface": { "enum": ["asphalt", "gravel"] } }));
        let b = definition(json!({ "surface": { "enum": ["paved"] } }));

        let forward = aggregate_properties(&[a.clone(), b.clone()]);
        let backward = aggregate_properties(&[b, a]);

        let collect = |m: &Map<String, Value>| {
            let mut values: Vec<String> = m["surface"]["enum"]
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_str().unwrap().to_string())
                .collect();
            values.sort();
            values
        };
        assert_eq!(collect(&forward), collect(&backward));
    }

    #[test]
    fn test_enum_merge_defaults_type_to_string() {
        let defs = vec![
            definition(json!({ "kerb": { "enum": ["raised"] } })),
            definition(json!({ "kerb": { "enum": ["flush"] } })),
        ];

        let merged = aggregate_properties(&defs);
        assert_eq!(merged["kerb"]["type"], json!("string"));
    }

    #[test]
    fn test_bounds_widen_monotonically() {
        let defs = vec![
            definition(json!({ "width": { "type": "number", "minimum": 1.0, "maximum": 5.0 } })),
            definition(json!({ "width": { "type": "number", "minimum": 0.5, "maximum": 3.0 } })),
            definition(json!({ "width": { "type": "number", "minimum": 2.0, "maximum": 9.0 } })),
        ];

        let merged = aggregate_properties(&defs);
        assert_eq!(merged["width"]["minimum"], json!(0.5));
        assert_eq!(merged["width"]["maximum"], json!(9.0));
    }

    #[test]
    fn test_length_bounds_widen() {
        let defs = vec![
            definition(json!({ "name": { "type": "string", "minLength": 2, "maxLength": 10 } })),
            definition(json!({ "name": { "type": "string", "minLength": 1, "maxLength": 40 } })),
        ];

        let merged = aggregate_properties(&defs);
        assert_eq!(merged["name"]["minLength"], json!(1));
        assert_eq!(merged["name"]["maxLength"], json!(40));
    }

    #[test]
    fn test_type_conflict_keeps_first() {
        let defs = vec![
            definition(json!({ "layer": { "type": "integer" } })),
            definition(json!({ "layer": { "type": "string" } })),
        ];

        let merged = aggregate_properties(&defs);
        assert_eq!(merged["layer"]["type"], json!("integer"));
    }

    #[test]
    fn test_description_backfilled_only_when_missing() {
        let defs = vec![
            definition(json!({ "surface": { "type": "string" } })),
            definition(json!({ "surface": { "type": "string", "description": "later" } })),
            definition(json!({ "surface": { "type": "string", "description": "latest" } })),
        ];

        let merged = aggregate_properties(&defs);
        assert_eq!(merged["surface"]["description"], json!("later"));
    }
}
