//! The `build` command: derive per-geometry FeatureCollection schemas

use std::fs;
use std::path::PathBuf;

use geoschema_core::SchemaDeriver;

use crate::error::CliError;

/// Arguments for the `build` command
#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    /// Path to the schema document to derive from
    #[arg(long)]
    pub schema: PathBuf,

    /// Directory the derived schema files are written to
    #[arg(long, default_value = "output")]
    pub out_dir: PathBuf,

    /// Also write the raw per-definition extraction list to this file
    #[arg(long)]
    pub results: Option<PathBuf>,
}

/// Handle the `build` command.
///
/// Every schema is derived and serialized before the first file is written,
/// so a failing run leaves the output directory untouched.
pub fn handle_build(args: &BuildArgs) -> Result<(), CliError> {
    let content = fs::read_to_string(&args.schema)?;
    let document: serde_json::Value = serde_json::from_str(&content)?;

    eprintln!("Deriving schemas from {}...", args.schema.display());

    let deriver = SchemaDeriver::new();
    let definitions = deriver.extract(&document)?;
    eprintln!("  Feature definitions found: {}", definitions.len());

    let results_dump = match &args.results {
        Some(_) => Some(serde_json::to_string_pretty(&definitions)?),
        None => None,
    };

    let derived = deriver.derive_from_definitions(definitions);
    if derived.is_empty() {
        eprintln!("No geometry group matched; nothing to write.");
        return Ok(());
    }

    // Serialize everything up front; writes happen only once all groups
    // have been built.
    let mut outputs: Vec<(PathBuf, String)> = Vec::new();
    for (filename, schema) in [
        ("lineSchema.json", &derived.line_string),
        ("pointsSchema.json", &derived.point),
        ("PolygonSchema.json", &derived.polygon_like),
    ] {
        if let Some(schema) = schema {
            outputs.push((args.out_dir.join(filename), serde_json::to_string_pretty(schema)?));
        }
    }

    fs::create_dir_all(&args.out_dir)?;
    if let (Some(path), Some(dump)) = (&args.results, &results_dump) {
        fs::write(path, dump)?;
        eprintln!("Wrote {}", path.display());
    }
    for (path, serialized) in &outputs {
        fs::write(path, serialized)?;
        eprintln!("Wrote {}", path.display());
    }

    Ok(())
}
