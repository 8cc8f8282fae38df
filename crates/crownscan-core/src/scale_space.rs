//! Construction of the continuous-scale response stack: one scale-normalized
//! Laplacian-of-Gaussian layer per sampled crown radius.

use ndarray::Array2;
use rayon::prelude::*;
use tracing::debug;

use crate::consts::{MIN_RADIUS_PIXELS, SCALE_STEP_EPSILON};
use crate::error::{CrownScanError, Result};
use crate::filters::log::scale_normalized_log;

/// One entry of the scale space: the physical feature radius this level
/// targets, and its filtered response raster.
#[derive(Clone, Debug)]
pub struct ScaleLevel {
    /// Target feature radius in meters.
    pub radius: f64,
    /// Scale-normalized LoG response, same dimensions as the input.
    pub response: Array2<f32>,
}

/// Ordered stack of scale levels, strictly increasing in radius.
#[derive(Clone, Debug)]
pub struct ScaleSpace {
    levels: Vec<ScaleLevel>,
}

impl ScaleSpace {
    pub fn levels(&self) -> &[ScaleLevel] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// The sampled radius range in meters.
#[derive(Clone, Copy, Debug)]
pub struct ScaleRange {
    pub minrad: f64,
    pub maxrad: f64,
    pub steprad: f64,
}

impl ScaleRange {
    /// Radii sampled from `minrad` to `maxrad` inclusive, stepping by
    /// `steprad`. The endpoint check carries a small tolerance so that
    /// ranges like 2.5..=20 step 0.5 include the top level despite floating
    /// accumulation.
    pub fn radii(&self) -> Vec<f64> {
        let span = (self.maxrad - self.minrad) / self.steprad;
        let count = (span + SCALE_STEP_EPSILON).floor() as usize + 1;
        (0..count)
            .map(|i| self.minrad + i as f64 * self.steprad)
            .collect()
    }

    /// Check the scale-range preconditions against the raster's ground
    /// sampling distance. Violations are configuration defects and fatal to
    /// the invocation.
    pub fn validate(&self, pixel_size: f64) -> Result<()> {
        if pixel_size <= 0.0 {
            return Err(CrownScanError::InvalidParameter(format!(
                "ground sampling distance must be positive, got {pixel_size}"
            )));
        }
        if self.minrad <= 0.0 {
            return Err(CrownScanError::InvalidParameter(format!(
                "minrad must be positive, got {}",
                self.minrad
            )));
        }
        if self.steprad <= 0.0 {
            return Err(CrownScanError::InvalidParameter(format!(
                "steprad must be positive, got {}",
                self.steprad
            )));
        }
        if self.minrad > self.maxrad {
            return Err(CrownScanError::InvalidParameter(format!(
                "minrad {} exceeds maxrad {}",
                self.minrad, self.maxrad
            )));
        }
        if self.minrad / pixel_size < MIN_RADIUS_PIXELS {
            return Err(CrownScanError::InvalidParameter(format!(
                "minrad {} m spans fewer than {MIN_RADIUS_PIXELS} pixels at {pixel_size} m/px; \
                 the smallest filter would be under-sampled",
                self.minrad
            )));
        }
        Ok(())
    }
}

/// Gaussian sigma (pixels) targeting features of the given physical radius.
/// A blob of radius r is detected at sigma = r / sqrt(2) in 2-D.
fn sigma_px(radius: f64, pixel_size: f64) -> f32 {
    (radius / pixel_size / std::f64::consts::SQRT_2) as f32
}

/// Build the response stack for `img`.
///
/// Levels are independent pure filters over the same immutable input, so
/// they are computed in parallel and assembled in increasing-radius order.
/// Fully reproducible for identical inputs.
pub fn build_scale_space(
    img: &Array2<f32>,
    pixel_size: f64,
    range: &ScaleRange,
) -> Result<ScaleSpace> {
    range.validate(pixel_size)?;
    let radii = range.radii();
    debug!(
        levels = radii.len(),
        minrad = range.minrad,
        maxrad = range.maxrad,
        "building scale space"
    );

    let levels: Vec<ScaleLevel> = radii
        .par_iter()
        .map(|&radius| ScaleLevel {
            radius,
            response: scale_normalized_log(img, sigma_px(radius, pixel_size)),
        })
        .collect();

    Ok(ScaleSpace { levels })
}
