//! Filesystem round-trip tests for the CLI command handlers

use std::fs;

use osw::commands::build::{BuildArgs, handle_build};
use osw::commands::samples::{SamplesArgs, handle_samples};
use serde_json::{Value, json};

fn write_schema(dir: &std::path::Path) -> std::path::PathBuf {
    let document = json!({
        "definitions": {
            "GeoJSON.LineString": {
                "properties": { "type": { "type": "string", "enum": ["LineString"] } }
            },
            "Alley": {
                "properties": {
                    "geometry": { "$ref": "#/definitions/GeoJSON.LineString" },
                    "properties": { "$ref": "#/definitions/AlleyFields" }
                }
            },
            "AlleyFields": {
                "properties": {
                    "highway": { "type": "string", "enum": ["service"] },
                    "surface": { "type": "string", "enum": ["asphalt"] }
                },
                "required": ["highway"]
            }
        }
    });

    let path = dir.join("schema.json");
    fs::write(&path, serde_json::to_string_pretty(&document).unwrap()).unwrap();
    path
}

#[test]
fn test_build_writes_only_nonempty_groups() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_schema(dir.path());
    let out_dir = dir.path().join("output");

    handle_build(&BuildArgs {
        schema,
        out_dir: out_dir.clone(),
        results: None,
    })
    .unwrap();

    assert!(out_dir.join("lineSchema.json").exists());
    assert!(!out_dir.join("pointsSchema.json").exists());
    assert!(!out_dir.join("PolygonSchema.json").exists());

    let written: Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join("lineSchema.json")).unwrap())
            .unwrap();
    assert_eq!(written["title"], json!("root"));
}

#[test]
fn test_build_dumps_extraction_results_when_asked() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_schema(dir.path());
    let results = dir.path().join("results.json");

    handle_build(&BuildArgs {
        schema,
        out_dir: dir.path().join("output"),
        results: Some(results.clone()),
    })
    .unwrap();

    let dump: Value = serde_json::from_str(&fs::read_to_string(&results).unwrap()).unwrap();
    assert_eq!(dump[0]["itemName"], json!("AlleyFields"));
    assert_eq!(dump[0]["geometryType"], json!("GeoJSON.LineString"));
}

#[test]
fn test_build_fails_without_writing_on_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("schema.json");
    fs::write(&schema, "[1, 2, 3]").unwrap();
    let out_dir = dir.path().join("output");

    let result = handle_build(&BuildArgs {
        schema,
        out_dir: out_dir.clone(),
        results: None,
    });

    assert!(result.is_err());
    assert!(!out_dir.exists());
}

#[test]
fn test_samples_round_trip_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_schema(dir.path());

    let run = |suffix: &str| {
        let valid_out = dir.path().join(format!("valid-{suffix}.geojson"));
        let invalid_out = dir.path().join(format!("invalid-{suffix}.geojson"));
        handle_samples(&SamplesArgs {
            schema: schema.clone(),
            tags: vec!["Alley".to_string()],
            seed: 42,
            count: 2,
            valid_out: valid_out.clone(),
            invalid_out: invalid_out.clone(),
        })
        .unwrap();
        (
            fs::read(valid_out).unwrap(),
            fs::read(invalid_out).unwrap(),
        )
    };

    let (valid_a, invalid_a) = run("a");
    let (valid_b, invalid_b) = run("b");
    assert_eq!(valid_a, valid_b);
    assert_eq!(invalid_a, invalid_b);

    let collection: Value = serde_json::from_slice(&valid_a).unwrap();
    assert_eq!(collection["type"], json!("FeatureCollection"));
    assert_eq!(collection["features"].as_array().unwrap().len(), 2);
}
