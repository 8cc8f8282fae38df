//! Vegetation indices derived from NIR and red surface reflectance.
//! NDVI is the default detector input; SAVI and EVI2 are soil- and
//! atmosphere-adjusted alternatives for the same role.

use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};

use crate::consts::{EPSILON, EVI2_ATMOSPHERE_COEFF, EVI2_CANOPY_FACTOR, EVI2_GAIN, SAVI_SOIL_FACTOR};

/// Which vegetation index feeds the blob detector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VegetationIndex {
    #[default]
    Ndvi,
    Savi,
    Evi2,
}

impl VegetationIndex {
    pub fn compute(&self, nir: &Array2<f32>, red: &Array2<f32>) -> Array2<f32> {
        match self {
            VegetationIndex::Ndvi => ndvi(nir, red),
            VegetationIndex::Savi => savi(nir, red, SAVI_SOIL_FACTOR),
            VegetationIndex::Evi2 => evi2(nir, red, EVI2_ATMOSPHERE_COEFF, EVI2_CANOPY_FACTOR, EVI2_GAIN),
        }
    }
}

/// Scale raw sensor values by the sensor maximum (e.g. 255 for 8-bit
/// channels), mapping them into [0, 1].
pub fn normalize(img: &Array2<f32>, max_value: f32) -> Array2<f32> {
    img.mapv(|v| v / max_value)
}

/// Normalized Difference Vegetation Index: `(nir - red) / (nir + red)`.
/// Ranges over [-1, 1]; values above ~0.2 typically indicate living
/// vegetation. Zero where the denominator vanishes.
pub fn ndvi(nir: &Array2<f32>, red: &Array2<f32>) -> Array2<f32> {
    let mut out = Array2::<f32>::zeros(nir.dim());
    Zip::from(&mut out).and(nir).and(red).for_each(|o, &n, &r| {
        let denom = n + r;
        *o = if denom.abs() < EPSILON { 0.0 } else { (n - r) / denom };
    });
    out
}

/// Soil-Adjusted Vegetation Index: `(1 + l)(nir - red) / (nir + red + l)`.
/// The soil factor `l` compensates for bare-soil brightness that makes
/// plain NDVI unstable over sparse canopies.
pub fn savi(nir: &Array2<f32>, red: &Array2<f32>, l: f32) -> Array2<f32> {
    let mut out = Array2::<f32>::zeros(nir.dim());
    Zip::from(&mut out).and(nir).and(red).for_each(|o, &n, &r| {
        let denom = n + r + l;
        *o = if denom.abs() < EPSILON {
            0.0
        } else {
            ((1.0 + l) * (n - r)) / denom
        };
    });
    out
}

/// Two-band Enhanced Vegetation Index: `g (nir - red) / (l + nir + c red)`.
/// Approximates EVI for sensors without a blue band.
pub fn evi2(nir: &Array2<f32>, red: &Array2<f32>, c: f32, l: f32, g: f32) -> Array2<f32> {
    let mut out = Array2::<f32>::zeros(nir.dim());
    Zip::from(&mut out).and(nir).and(red).for_each(|o, &n, &r| {
        let denom = l + n + c * r;
        *o = if denom.abs() < EPSILON {
            0.0
        } else {
            g * (n - r) / denom
        };
    });
    out
}
