use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use crownscan_core::geo::{tile_grid, BoundingBox};
use crownscan_core::pipeline::run_batch_with_progress;
use crownscan_core::source::{CachedSource, DirectorySource};

use crate::summary::{print_batch_result, print_run_summary};

use super::detect::load_config;

#[derive(Args)]
pub struct RunArgs {
    /// Bounding box to analyze: lon1,lat1,lon2,lat2
    pub bbox: String,

    /// Directory of pre-fetched tile images named <col>_<row>.png
    #[arg(long)]
    pub tiles: PathBuf,

    /// Analysis config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Cache fetched tiles in this directory
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Output directory for per-tile and merged results
    #[arg(short, long, default_value = "results")]
    pub output: PathBuf,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let bbox = parse_bbox(&args.bbox)?;

    print_run_summary(&config, &bbox, &args.output);

    let tile_count = tile_grid(
        &bbox.normalized(),
        config.data.tile_size_px,
        config.data.pixel_size,
    )
    .len();

    let pb = ProgressBar::new(tile_count as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:12} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("analyzing");

    let on_tile = |done: usize| pb.set_position(done as u64);

    let source = DirectorySource::new(&args.tiles);
    let summary = match &args.cache {
        Some(cache_dir) => {
            let cached = CachedSource::new(source, cache_dir.clone());
            run_batch_with_progress(&bbox, &cached, &config, &args.output, on_tile)?
        }
        None => run_batch_with_progress(&bbox, &source, &config, &args.output, on_tile)?,
    };

    pb.finish_with_message("done");
    print_batch_result(&summary, &args.output);
    Ok(())
}

fn parse_bbox(input: &str) -> Result<BoundingBox> {
    let parts: Vec<f64> = input
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()?;
    if parts.len() != 4 {
        bail!("expected \"lon1,lat1,lon2,lat2\", got {input:?}");
    }
    Ok(BoundingBox::new(parts[0], parts[1], parts[2], parts[3]))
}
