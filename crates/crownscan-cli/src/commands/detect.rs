use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use crownscan_core::geo::GeoTransform;
use crownscan_core::io::imagery::load_imagery;
use crownscan_core::io::writer::write_detections;
use crownscan_core::pipeline::analyze_imagery;
use crownscan_core::pipeline::config::AnalysisConfig;

#[derive(Args)]
pub struct DetectArgs {
    /// Input NIR false-colour tile image (channels: NIR, red, green)
    pub image: PathBuf,

    /// Analysis config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Ground sampling distance override (meters per pixel)
    #[arg(long)]
    pub pixel_size: Option<f64>,

    /// Longitude,latitude of the tile's southwest corner
    #[arg(long, default_value = "0.0,0.0")]
    pub origin: String,

    /// Output CSV path
    #[arg(short, long, default_value = "detections.csv")]
    pub output: PathBuf,
}

pub fn run(args: &DetectArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(pixel_size) = args.pixel_size {
        config.data.pixel_size = pixel_size;
    }
    let (lon, lat) =
        parse_pair(&args.origin).context("invalid --origin, expected \"lon,lat\"")?;

    let imagery = load_imagery(&args.image)
        .with_context(|| format!("Failed to load {}", args.image.display()))?;
    let transform = GeoTransform::new(lon, lat, config.data.pixel_size, imagery.height());

    let detections = analyze_imagery(&imagery, &transform, &config)?;
    write_detections(&args.output, &detections)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "{} tree crowns detected, written to {}",
        detections.len(),
        args.output.display()
    );
    Ok(())
}

/// Load an analysis config from a TOML file, or fall back to the defaults.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&contents).context("Invalid analysis config")
        }
        None => Ok(AnalysisConfig::default()),
    }
}

/// Parse a "a,b" pair of floats.
pub fn parse_pair(input: &str) -> Result<(f64, f64)> {
    let parts: Vec<f64> = input
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()?;
    if parts.len() != 2 {
        bail!("expected two comma-separated numbers, got {input:?}");
    }
    Ok((parts[0], parts[1]))
}
