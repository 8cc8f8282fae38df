use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_NIR_MAX_VALUE, DEFAULT_PIXEL_SIZE_M, DEFAULT_TILE_SIZE_PX};
use crate::detect::DetectionParams;
use crate::indices::VegetationIndex;

/// Full configuration for a tree-detection analysis.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub scale_space: DetectionParams,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Imagery and raster settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    /// Ground sampling distance in meters per pixel.
    #[serde(default = "default_pixel_size")]
    pub pixel_size: f64,
    /// Edge length (pixels) of each fetched tile.
    #[serde(default = "default_tile_size")]
    pub tile_size_px: usize,
    /// Coordinate reference system of bounding boxes and output coordinates.
    #[serde(default = "default_crs")]
    pub coord_crs: String,
    /// Sensor maximum used to scale raw NIR samples into [0, 1].
    #[serde(default = "default_nir_max")]
    pub nir_max_value: f32,
    /// Vegetation index fed to the blob detector.
    #[serde(default)]
    pub index: VegetationIndex,
}

fn default_pixel_size() -> f64 {
    DEFAULT_PIXEL_SIZE_M
}
fn default_tile_size() -> usize {
    DEFAULT_TILE_SIZE_PX
}
fn default_crs() -> String {
    "EPSG:4326".to_string()
}
fn default_nir_max() -> f32 {
    DEFAULT_NIR_MAX_VALUE
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            pixel_size: DEFAULT_PIXEL_SIZE_M,
            tile_size_px: DEFAULT_TILE_SIZE_PX,
            coord_crs: default_crs(),
            nir_max_value: DEFAULT_NIR_MAX_VALUE,
            index: VegetationIndex::default(),
        }
    }
}

/// Result persistence settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write per-tile CSV files and the merged results file.
    #[serde(default = "default_save_results")]
    pub save_results: bool,
    /// Re-analyze tiles whose result CSV already exists.
    #[serde(default)]
    pub overwrite: bool,
}

fn default_save_results() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save_results: true,
            overwrite: false,
        }
    }
}
