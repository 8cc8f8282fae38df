use tracing::{debug, info};

use crate::detect::{detect_trees, Detection};
use crate::error::Result;
use crate::geo::GeoTransform;
use crate::indices::normalize;
use crate::raster::{NirImagery, Raster};

use super::config::AnalysisConfig;

/// Analyze one tile of NIR imagery: normalize the bands, derive the
/// configured vegetation index, run the scale-space detector, and
/// georeference the surviving blobs.
///
/// An empty result is a valid outcome, not an error.
pub fn analyze_imagery(
    imagery: &NirImagery,
    transform: &GeoTransform,
    config: &AnalysisConfig,
) -> Result<Vec<Detection>> {
    let nir = normalize(&imagery.nir, config.data.nir_max_value);
    let red = normalize(&imagery.red, config.data.nir_max_value);
    let index = config.data.index.compute(&nir, &red);
    debug!(index = ?config.data.index, "computed vegetation index");

    let raster = Raster::new(index, config.data.pixel_size, *transform);
    let detections = detect_trees(&raster, &config.scale_space)?;
    if detections.is_empty() {
        info!("no tree crowns detected");
    } else {
        info!(count = detections.len(), "detected tree crowns");
    }
    Ok(detections)
}
