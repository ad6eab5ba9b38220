//! The `samples` command: generate valid and invalid GeoJSON samples

use std::fs;
use std::path::PathBuf;

use geoschema_core::{SampleConfig, SampleGenerator};

use crate::error::CliError;

/// Arguments for the `samples` command
#[derive(clap::Args, Debug)]
pub struct SamplesArgs {
    /// Path to the schema document
    #[arg(long)]
    pub schema: PathBuf,

    /// Definition names to sample, comma-separated
    #[arg(long, value_delimiter = ',', required = true)]
    pub tags: Vec<String>,

    /// Seed for the reproducible random stream
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Number of feature pairs per tag
    #[arg(long, default_value_t = 1)]
    pub count: usize,

    /// Output file for the valid FeatureCollection
    #[arg(long, default_value = "valid_sample.geojson")]
    pub valid_out: PathBuf,

    /// Output file for the invalid FeatureCollection
    #[arg(long, default_value = "invalid_sample.geojson")]
    pub invalid_out: PathBuf,
}

/// Handle the `samples` command
pub fn handle_samples(args: &SamplesArgs) -> Result<(), CliError> {
    let content = fs::read_to_string(&args.schema)?;
    let document: serde_json::Value = serde_json::from_str(&content)?;

    eprintln!("Generating samples from {}...", args.schema.display());
    eprintln!("  Tags: {}", args.tags.join(", "));
    eprintln!("  Seed: {}", args.seed);
    eprintln!("  Features per tag: {}", args.count);

    let generator = SampleGenerator::with_config(SampleConfig {
        seed: args.seed,
        features_per_tag: args.count,
    });
    let samples = generator.generate(&document, &args.tags)?;

    // Both collections are complete before either file is written
    let valid = serde_json::to_string_pretty(&samples.valid)?;
    let invalid = serde_json::to_string_pretty(&samples.invalid)?;

    fs::write(&args.valid_out, valid)?;
    eprintln!("Wrote {}", args.valid_out.display());
    fs::write(&args.invalid_out, invalid)?;
    eprintln!("Wrote {}", args.invalid_out.display());

    Ok(())
}
