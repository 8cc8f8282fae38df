pub mod config;
pub mod extract;
pub mod prune;

pub use config::DetectionParams;
pub use extract::{extract_candidates, Candidate};
pub use prune::{overlap_fraction, prune_overlaps};

use ndarray::Array2;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::geo::GeoTransform;
use crate::raster::Raster;
use crate::scale_space::build_scale_space;

/// A pruned candidate promoted to output status, with geographic
/// coordinates derived from the raster's transform.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Detection {
    pub longitude: f64,
    pub latitude: f64,
    /// Crown radius in meters.
    pub radius: f64,
    /// Scale-space response at the detected maximum.
    pub response: f32,
}

impl Detection {
    pub fn from_candidate(candidate: &Candidate, transform: &GeoTransform) -> Self {
        let (longitude, latitude) =
            transform.pixel_to_lonlat(candidate.row as f64, candidate.col as f64);
        Self {
            longitude,
            latitude,
            radius: candidate.radius,
            response: candidate.response,
        }
    }

    pub fn diameter(&self) -> f64 {
        2.0 * self.radius
    }

    pub fn circumference(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.radius
    }

    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }
}

/// Run the scale-space blob detector over a single-band image.
///
/// Pipeline: build the LoG response stack, extract thresholded 3-D local
/// maxima, then prune overlapping disks strongest-first. Returns candidates
/// in the pruner's deterministic order.
pub fn detect_blobs(
    img: &Array2<f32>,
    pixel_size: f64,
    params: &DetectionParams,
) -> Result<Vec<Candidate>> {
    let space = build_scale_space(img, pixel_size, &params.scale_range())?;
    let candidates = extract_candidates(&space, params.threshold_rel_blob_peaks);
    debug!(candidates = candidates.len(), "extracted scale-space maxima");

    let kept = prune_overlaps(candidates, params.blob_overlap_threshold, pixel_size);
    debug!(detections = kept.len(), "pruned overlapping blobs");
    Ok(kept)
}

/// Detect tree crowns in a georeferenced raster.
pub fn detect_trees(raster: &Raster, params: &DetectionParams) -> Result<Vec<Detection>> {
    let blobs = detect_blobs(&raster.data, raster.pixel_size, params)?;
    Ok(blobs
        .iter()
        .map(|c| Detection::from_candidate(c, &raster.transform))
        .collect())
}
