use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::Result;
use crate::geo::{tile_grid, BoundingBox, GeoTransform, Tile};
use crate::io::writer::{merge_results, write_detections, write_failed};
use crate::source::RasterSource;

use super::analyze::analyze_imagery;
use super::config::AnalysisConfig;

/// Outcome of a batch run over a bounding box.
#[derive(Clone, Debug, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: Vec<String>,
    /// Tiles skipped because their result CSV already existed.
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
    /// Detections across all analyzed tiles.
    pub detections: usize,
}

enum TileOutcome {
    Done(usize),
    Skipped,
    Failed(String),
}

/// Run the full analysis over `bbox`: cut it into tiles, fetch and analyze
/// each one, and write per-tile CSVs plus a merged `results.csv` under
/// `out_dir`.
///
/// Tiles are independent pipeline invocations with no shared mutable state
/// and are processed in parallel. A failure on one tile is recorded in the
/// summary (and in `failed.csv` for later retry) but never aborts the batch.
pub fn run_batch(
    bbox: &BoundingBox,
    source: &dyn RasterSource,
    config: &AnalysisConfig,
    out_dir: &Path,
) -> Result<BatchSummary> {
    run_batch_with_progress(bbox, source, config, out_dir, |_| {})
}

/// Same as [`run_batch`], calling `on_tile(tiles_done)` as each tile
/// finishes.
pub fn run_batch_with_progress(
    bbox: &BoundingBox,
    source: &dyn RasterSource,
    config: &AnalysisConfig,
    out_dir: &Path,
    on_tile: impl Fn(usize) + Send + Sync,
) -> Result<BatchSummary> {
    let bbox = bbox.normalized();
    let tiles = tile_grid(&bbox, config.data.tile_size_px, config.data.pixel_size);
    let results_dir = out_dir.join("results");
    std::fs::create_dir_all(&results_dir)?;
    info!(
        tiles = tiles.len(),
        source = source.name(),
        "starting batch analysis"
    );

    let done = AtomicUsize::new(0);
    let outcomes: Vec<(String, TileOutcome)> = tiles
        .par_iter()
        .map(|tile| {
            let outcome = process_tile(tile, source, config, &results_dir);
            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            on_tile(finished);
            (tile.name.clone(), outcome)
        })
        .collect();

    let mut summary = BatchSummary {
        total: tiles.len(),
        ..Default::default()
    };
    for (name, outcome) in outcomes {
        match outcome {
            TileOutcome::Done(count) => {
                summary.detections += count;
                summary.succeeded.push(name);
            }
            TileOutcome::Skipped => summary.skipped.push(name),
            TileOutcome::Failed(err) => {
                warn!(tile = %name, error = %err, "tile failed");
                summary.failed.push(name);
            }
        }
    }

    if !summary.failed.is_empty() {
        write_failed(&out_dir.join("failed.csv"), &summary.failed)?;
    }
    if config.output.save_results {
        merge_results(&results_dir, &out_dir.join("results.csv"))?;
    }
    info!(
        total = summary.total,
        succeeded = summary.succeeded.len(),
        skipped = summary.skipped.len(),
        failed = summary.failed.len(),
        detections = summary.detections,
        "batch complete"
    );
    Ok(summary)
}

fn process_tile(
    tile: &Tile,
    source: &dyn RasterSource,
    config: &AnalysisConfig,
    results_dir: &Path,
) -> TileOutcome {
    let csv_path = results_dir.join(format!("{}.csv", tile.name));
    if csv_path.exists() && !config.output.overwrite {
        return TileOutcome::Skipped;
    }

    let run = || -> Result<usize> {
        let imagery = source.fetch(tile, config.data.tile_size_px)?;
        let transform =
            GeoTransform::from_bbox(&tile.bbox, config.data.pixel_size, imagery.height());
        let detections = analyze_imagery(&imagery, &transform, config)?;
        if config.output.save_results {
            write_detections(&csv_path, &detections)?;
        }
        Ok(detections.len())
    };

    match run() {
        Ok(count) => TileOutcome::Done(count),
        Err(err) => TileOutcome::Failed(err.to_string()),
    }
}
