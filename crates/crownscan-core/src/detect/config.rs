use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_MAX_RADIUS_M, DEFAULT_MIN_RADIUS_M, DEFAULT_OVERLAP_THRESHOLD,
    DEFAULT_PEAK_THRESHOLD_REL, DEFAULT_STEP_RADIUS_M,
};
use crate::scale_space::ScaleRange;

/// Parameters for the scale-space blob detector.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectionParams {
    /// Smallest tree-crown radius to search for (meters). Must span at
    /// least 3 pixels at the active ground sampling distance.
    #[serde(default = "default_minrad")]
    pub minrad: f64,
    /// Largest tree-crown radius to search for (meters).
    #[serde(default = "default_maxrad")]
    pub maxrad: f64,
    /// Scale sampling step (meters).
    #[serde(default = "default_steprad")]
    pub steprad: f64,
    /// A peak is kept only if its response is at least this fraction of the
    /// strongest response anywhere in the scale-space volume.
    #[serde(default = "default_peak_threshold")]
    pub threshold_rel_blob_peaks: f32,
    /// Overlap fraction, measured against the smaller disk, above which the
    /// weaker of two blobs is pruned.
    #[serde(default = "default_overlap_threshold")]
    pub blob_overlap_threshold: f32,
}

fn default_minrad() -> f64 {
    DEFAULT_MIN_RADIUS_M
}
fn default_maxrad() -> f64 {
    DEFAULT_MAX_RADIUS_M
}
fn default_steprad() -> f64 {
    DEFAULT_STEP_RADIUS_M
}
fn default_peak_threshold() -> f32 {
    DEFAULT_PEAK_THRESHOLD_REL
}
fn default_overlap_threshold() -> f32 {
    DEFAULT_OVERLAP_THRESHOLD
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            minrad: DEFAULT_MIN_RADIUS_M,
            maxrad: DEFAULT_MAX_RADIUS_M,
            steprad: DEFAULT_STEP_RADIUS_M,
            threshold_rel_blob_peaks: DEFAULT_PEAK_THRESHOLD_REL,
            blob_overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
        }
    }
}

impl DetectionParams {
    pub fn scale_range(&self) -> ScaleRange {
        ScaleRange {
            minrad: self.minrad,
            maxrad: self.maxrad,
            steprad: self.steprad,
        }
    }
}
