use ndarray::Array2;

use crate::error::{CrownScanError, Result};
use crate::geo::GeoTransform;

/// A single-band georeferenced raster.
/// Samples are f32, row-major, shape = (height, width); row 0 is the
/// northern edge of the covered area.
#[derive(Clone, Debug)]
pub struct Raster {
    pub data: Array2<f32>,
    /// Ground sampling distance in meters per pixel.
    pub pixel_size: f64,
    /// Maps pixel indices to geographic coordinates.
    pub transform: GeoTransform,
}

impl Raster {
    pub fn new(data: Array2<f32>, pixel_size: f64, transform: GeoTransform) -> Self {
        Self {
            data,
            pixel_size,
            transform,
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// The three bands of a false-colour NIR aerial tile.
/// Channel order follows the imagery convention: 0 = near-infrared,
/// 1 = red, 2 = green.
#[derive(Clone, Debug)]
pub struct NirImagery {
    pub nir: Array2<f32>,
    pub red: Array2<f32>,
    pub green: Array2<f32>,
}

impl NirImagery {
    /// Bundle three bands, validating that they share dimensions.
    pub fn new(nir: Array2<f32>, red: Array2<f32>, green: Array2<f32>) -> Result<Self> {
        let (rows, cols) = nir.dim();
        for band in [&red, &green] {
            if band.dim() != (rows, cols) {
                let (r, c) = band.dim();
                return Err(CrownScanError::ShapeMismatch {
                    expected_rows: rows,
                    expected_cols: cols,
                    rows: r,
                    cols: c,
                });
            }
        }
        Ok(Self { nir, red, green })
    }

    pub fn width(&self) -> usize {
        self.nir.ncols()
    }

    pub fn height(&self) -> usize {
        self.nir.nrows()
    }

    pub fn dim(&self) -> (usize, usize) {
        self.nir.dim()
    }
}
