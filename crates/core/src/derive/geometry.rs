//! Geometry tag parsing and group classification

use serde::{Deserialize, Serialize};

use super::extract::FieldDefinition;

/// GeoJSON geometry kinds recognized by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPolygon,
}

impl GeometryKind {
    /// The GeoJSON `geometry.type` string for this kind
    pub fn type_name(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
        }
    }

    /// Parse a single tag token, stripping any namespace prefix, so both
    /// `"GeoJSON.LineString"` and `"LineString"` are recognized.
    pub fn parse(token: &str) -> Option<GeometryKind> {
        let simple = token.trim().rsplit('.').next().unwrap_or(token);
        match simple {
            "Point" => Some(GeometryKind::Point),
            "LineString" => Some(GeometryKind::LineString),
            "Polygon" => Some(GeometryKind::Polygon),
            "MultiPolygon" => Some(GeometryKind::MultiPolygon),
            _ => None,
        }
    }
}

/// Parse a raw geometry tag such as `"GeoJSON.Polygon | GeoJSON.MultiPolygon"`
/// into the set of kinds it names, in encounter order. Unknown tokens are
/// dropped.
pub fn parse_geometry_set(geometry_type: &str) -> Vec<GeometryKind> {
    let mut kinds = Vec::new();
    for token in geometry_type.split('|') {
        if let Some(kind) = GeometryKind::parse(token)
            && !kinds.contains(&kind)
        {
            kinds.push(kind);
        }
    }
    kinds
}

/// Field definitions bucketed by the geometry shape they validate.
///
/// A definition whose geometry set spans several kinds appears in every
/// matching bucket; order within a bucket is document encounter order.
#[derive(Debug, Default)]
pub struct GeometryGroups {
    pub line_strings: Vec<FieldDefinition>,
    pub points: Vec<FieldDefinition>,
    pub polygon_like: Vec<FieldDefinition>,
}

/// Partition resolved field definitions into geometry groups
pub fn classify_definitions(definitions: Vec<FieldDefinition>) -> GeometryGroups {
    let mut groups = GeometryGroups::default();

    for definition in definitions {
        let kinds = parse_geometry_set(&definition.geometry_type);
        if kinds.is_empty() {
            tracing::debug!(
                item = %definition.item_name,
                geometry_type = %definition.geometry_type,
                "definition matches no known geometry kind"
            );
            continue;
        }

        if kinds.contains(&GeometryKind::LineString) {
            groups.line_strings.push(definition.clone());
        }
        if kinds.contains(&GeometryKind::Point) {
            groups.points.push(definition.clone());
        }
        if kinds.contains(&GeometryKind::Polygon) || kinds.contains(&GeometryKind::MultiPolygon) {
            groups.polygon_like.push(definition);
        }
    }

    groups
}

/// The polygon kinds actually present in a PolygonLike group, in encounter
/// order. Drives the `geometry.type` enum of the emitted schema.
pub fn polygon_kinds(definitions: &[FieldDefinition]) -> Vec<GeometryKind> {
    let mut kinds = Vec::new();
    for definition in definitions {
        for kind in parse_geometry_set(&definition.geometry_type) {
            if matches!(kind, GeometryKind::Polygon | GeometryKind::MultiPolygon)
                && !kinds.contains(&kind)
            {
                kinds.push(kind);
            }
        }
    }
    kinds
}
