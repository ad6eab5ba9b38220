//! osw CLI entry point

use clap::Parser;

/// GeoJSON schema toolchain for tagged feature-type documents.
///
/// Derives per-geometry FeatureCollection schemas from a single schema
/// document and generates deterministic valid/invalid sample data.
#[derive(Parser, Debug)]
#[command(name = "osw", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Derive per-geometry FeatureCollection schemas.
    Build(osw::commands::build::BuildArgs),
    /// Generate valid and invalid GeoJSON sample FeatureCollections.
    Samples(osw::commands::samples::SamplesArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build(args) => osw::commands::build::handle_build(&args)?,
        Commands::Samples(args) => osw::commands::samples::handle_samples(&args)?,
    }

    Ok(())
}
