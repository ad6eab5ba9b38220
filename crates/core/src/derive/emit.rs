//! FeatureCollection schema assembly
//!
//! Builds the output JSON Schema documents: a position/coordinates
//! sub-schema per geometry kind, the geometry object wrapper, and the
//! strict FeatureCollection template around the aggregated properties and
//! dependency rules.

use serde_json::{Map, Value, json};

use super::geometry::GeometryKind;

/// A single `[longitude, latitude]` position tuple
fn position_schema() -> Value {
    json!({
        "type": "array",
        "additionalItems": false,
        "items": [
            { "type": "number", "minimum": -180.0, "maximum": 180.0 },
            { "type": "number", "minimum": -90.0, "maximum": 90.0 }
        ]
    })
}

/// Polygon coordinates: at least one linear ring of at least 4 positions.
/// Ring closure is assumed, not enforced beyond the position minimum.
fn polygon_coordinates() -> Value {
    json!({
        "type": "array",
        "minItems": 1,
        "items": {
            "type": "array",
            "minItems": 4,
            "items": position_schema()
        }
    })
}

/// MultiPolygon coordinates: an array of Polygon coordinate arrays
fn multi_polygon_coordinates() -> Value {
    json!({
        "type": "array",
        "minItems": 1,
        "items": polygon_coordinates()
    })
}

/// Build the geometry object sub-schema for a group's kinds.
///
/// The `type` enum lists every kind in the group; when the group holds both
/// Polygon and MultiPolygon members the coordinates accept either shape.
pub fn geometry_schema(kinds: &[GeometryKind]) -> Value {
    let type_enum: Vec<&str> = kinds.iter().map(GeometryKind::type_name).collect();
    let first = type_enum.first().copied().unwrap_or("Point");

    let coordinates = match kinds {
        [GeometryKind::Point] => position_schema(),
        [GeometryKind::LineString] => json!({
            "title": "coordinates",
            "type": "array",
            "minItems": 2,
            "items": position_schema()
        }),
        [GeometryKind::Polygon] => polygon_coordinates(),
        [GeometryKind::MultiPolygon] => multi_polygon_coordinates(),
        _ => json!({ "anyOf": [polygon_coordinates(), multi_polygon_coordinates()] }),
    };

    json!({
        "title": "geometryObject",
        "type": "object",
        "required": ["type", "coordinates"],
        "additionalProperties": false,
        "properties": {
            "type": {
                "title": "GeometryType",
                "type": "string",
                "default": first,
                "enum": type_enum
            },
            "coordinates": coordinates
        }
    })
}

/// Wrap a group's geometry schema, aggregated properties, and dependency
/// rules into the final FeatureCollection schema. `additionalProperties` is
/// false at every object level; `dependencies` is attached only when
/// non-empty.
pub fn feature_collection_schema(
    kinds: &[GeometryKind],
    properties: Map<String, Value>,
    dependencies: Map<String, Value>,
) -> Value {
    let mut properties_object = json!({
        "title": "propertiesObject",
        "type": "object",
        "additionalProperties": false,
        "properties": Value::Object(properties)
    });
    if !dependencies.is_empty() {
        properties_object["dependencies"] = Value::Object(dependencies);
    }

    json!({
        "title": "root",
        "type": "object",
        "required": ["type", "features"],
        "additionalProperties": false,
        "properties": {
            "type": {
                "title": "Feature Collection",
                "type": "string",
                "default": "FeatureCollection",
                "enum": ["FeatureCollection"]
            },
            "features": {
                "title": "features array",
                "type": "array",
                "minItems": 1,
                "additionalItems": false,
                "items": {
                    "title": "FeatureObject",
                    "type": "object",
                    "required": ["type", "geometry"],
                    "additionalProperties": false,
                    "properties": {
                        "type": {
                            "title": "FeatureType",
                            "type": "string",
                            "default": "Feature",
                            "enum": ["Feature"]
                        },
                        "geometry": geometry_schema(kinds),
                        "properties": properties_object
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_coordinates_are_a_single_position() {
        let schema = geometry_schema(&[GeometryKind::Point]);
        assert_eq!(schema["properties"]["type"]["enum"], json!(["Point"]));
        assert_eq!(
            schema["properties"]["coordinates"]["items"][0]["minimum"],
            json!(-180.0)
        );
    }

    #[test]
    fn test_line_string_requires_two_positions() {
        let schema = geometry_schema(&[GeometryKind::LineString]);
        assert_eq!(schema["properties"]["coordinates"]["minItems"], json!(2));
    }

    #[test]
    fn test_polygon_rings_need_four_positions() {
        let schema = geometry_schema(&[GeometryKind::Polygon]);
        assert_eq!(
            schema["properties"]["coordinates"]["items"]["minItems"],
            json!(4)
        );
    }

    #[test]
    fn test_mixed_polygon_group_accepts_either_shape() {
        let schema = geometry_schema(&[GeometryKind::Polygon, GeometryKind::MultiPolygon]);
        assert_eq!(
            schema["properties"]["type"]["enum"],
            json!(["Polygon", "MultiPolygon"])
        );
        assert!(schema["properties"]["coordinates"]["anyOf"].is_array());
    }

    #[test]
    fn test_feature_collection_is_strict_at_every_level() {
        let schema = feature_collection_schema(&[GeometryKind::Point], Map::new(), Map::new());

        assert_eq!(schema["additionalProperties"], json!(false));
        let feature = &schema["properties"]["features"]["items"];
        assert_eq!(feature["additionalProperties"], json!(false));
        assert_eq!(
            feature["properties"]["properties"]["additionalProperties"],
            json!(false)
        );
    }

    #[test]
    fn test_dependencies_omitted_when_empty() {
        let schema = feature_collection_schema(&[GeometryKind::Point], Map::new(), Map::new());
        let properties_object = &schema["properties"]["features"]["items"]["properties"]["properties"];
        assert!(properties_object.get("dependencies").is_none());
    }

    #[test]
    fn test_dependencies_attached_when_present() {
        let mut dependencies = Map::new();
        dependencies.insert("surface".to_string(), json!({ "allOf": [] }));

        let schema =
            feature_collection_schema(&[GeometryKind::LineString], Map::new(), dependencies);
        let properties_object = &schema["properties"]["features"]["items"]["properties"]["properties"];
        assert!(properties_object["dependencies"]["surface"].is_object());
    }
}
