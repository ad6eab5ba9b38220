//! Extraction of Feature-shaped definitions from a schema document
//!
//! A top-level definition qualifies as Feature-shaped when it references
//! both a geometry sub-schema and a field sub-schema:
//!
//! ```json
//! {
//!   "Alley": {
//!     "properties": {
//!       "geometry": { "$ref": "#/definitions/GeoJSON.LineString" },
//!       "properties": { "$ref": "#/definitions/AlleyFields" }
//!     }
//!   }
//! }
//! ```
//!
//! Everything else in `definitions` is left alone; most definitions are
//! building blocks, not Feature wrappers.

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::DeriveError;
use super::resolver::{inline_refs, last_pointer_segment, resolve_pointer};

/// A fully inlined field-defining sub-schema, tagged with the geometry and
/// field-schema names from the source definition's references.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Property name to property schema, with every `$ref` inlined
    pub properties: Map<String, Value>,

    /// Required property names, in declaration order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Raw geometry tag, e.g. `"GeoJSON.LineString"` or
    /// `"GeoJSON.Polygon | GeoJSON.MultiPolygon"`
    pub geometry_type: String,

    /// Name of the field sub-schema this definition was resolved from,
    /// e.g. `"AlleyFields"`
    pub item_name: String,
}

/// Walk the document's top-level `definitions` (or `$defs`) mapping and
/// resolve every Feature-shaped definition into a [`FieldDefinition`].
///
/// Definitions whose field reference does not resolve are skipped with a
/// warning; the remaining definitions are still usable. Reference errors
/// encountered while inlining a field sub-schema are fatal, since a
/// dangling reference would make the derived schema unsound.
pub fn extract_definitions(document: &Value) -> Result<Vec<FieldDefinition>, DeriveError> {
    let root = document
        .as_object()
        .ok_or_else(|| DeriveError::InvalidInput("expected an object at the root".to_string()))?;

    let definitions = root
        .get("definitions")
        .or_else(|| root.get("$defs"))
        .and_then(Value::as_object)
        .ok_or_else(|| {
            DeriveError::InvalidInput("missing a definitions (or $defs) mapping".to_string())
        })?;

    let mut results = Vec::new();

    for (name, definition) in definitions {
        let geometry_ref = definition
            .pointer("/properties/geometry/$ref")
            .and_then(Value::as_str);
        let fields_ref = definition
            .pointer("/properties/properties/$ref")
            .and_then(Value::as_str);

        let (Some(geometry_ref), Some(fields_ref)) = (geometry_ref, fields_ref) else {
            continue;
        };

        let fields = match resolve_pointer(document, fields_ref) {
            Ok(Value::Null) | Err(DeriveError::UnresolvedReference { .. }) => {
                tracing::warn!(
                    definition = %name,
                    reference = %fields_ref,
                    "skipping definition: field reference has no target"
                );
                continue;
            }
            Ok(value) => value,
            Err(e) => return Err(e),
        };

        let resolved = inline_refs(document, fields)?;
        let Some(resolved) = resolved.as_object() else {
            tracing::warn!(
                definition = %name,
                reference = %fields_ref,
                "skipping definition: field schema is not an object"
            );
            continue;
        };

        let properties = resolved
            .get("properties")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let required = resolved
            .get("required")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        results.push(FieldDefinition {
            properties,
            required,
            geometry_type: last_pointer_segment(geometry_ref).to_string(),
            item_name: last_pointer_segment(fields_ref).to_string(),
        });
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature_document() -> Value {
        json!({
            "definitions": {
                "GeoJSON.LineString": { "properties": { "type": { "enum": ["LineString"] } } },
                "Alley": {
                    "properties": {
                        "geometry": { "$ref": "#/definitions/GeoJSON.LineString" },
                        "properties": { "$ref": "#/definitions/AlleyFields" }
                    }
                },
                "AlleyFields": {
                    "properties": {
                        "highway": { "type": "string", "enum": ["service"] }
                    },
                    "required": ["highway"]
                },
                "NotAFeature": { "type": "string" }
            }
        })
    }

    #[test]
    fn test_extract_pairs_geometry_and_fields() {
        let definitions = extract_definitions(&feature_document()).unwrap();

        assert_eq!(definitions.len(), 1);
        let alley = &definitions[0];
        assert_eq!(alley.item_name, "AlleyFields");
        assert_eq!(alley.geometry_type, "GeoJSON.LineString");
        assert_eq!(alley.required, vec!["highway"]);
        assert_eq!(alley.properties["highway"]["enum"], json!(["service"]));
    }

    #[test]
    fn test_extract_skips_definitions_without_both_refs() {
        let doc = json!({
            "definitions": {
                "GeometryOnly": {
                    "properties": { "geometry": { "$ref": "#/definitions/G" } }
                },
                "G": {}
            }
        });

        assert!(extract_definitions(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_extract_skips_missing_field_target() {
        let doc = json!({
            "definitions": {
                "Broken": {
                    "properties": {
                        "geometry": { "$ref": "#/definitions/G" },
                        "properties": { "$ref": "#/definitions/Nope" }
                    }
                },
                "G": {}
            }
        });

        // The dangling field reference drops only that definition.
        assert!(extract_definitions(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_extract_rejects_non_object_input() {
        let err = extract_definitions(&json!([])).unwrap_err();
        assert!(matches!(err, DeriveError::InvalidInput(_)));

        let err = extract_definitions(&json!({ "title": "no definitions" })).unwrap_err();
        assert!(matches!(err, DeriveError::InvalidInput(_)));
    }

    #[test]
    fn test_extract_reads_defs_alias() {
        let doc = json!({
            "$defs": {
                "Thing": {
                    "properties": {
                        "geometry": { "$ref": "#/$defs/G" },
                        "properties": { "$ref": "#/$defs/ThingFields" }
                    }
                },
                "G": {},
                "ThingFields": { "properties": { "name": { "type": "string" } } }
            }
        });

        let definitions = extract_definitions(&doc).unwrap();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].item_name, "ThingFields");
    }
}
