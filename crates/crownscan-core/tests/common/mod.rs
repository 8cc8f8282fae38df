use ndarray::Array2;

use crownscan_core::raster::NirImagery;

/// Uniform raster.
pub fn flat(h: usize, w: usize, value: f32) -> Array2<f32> {
    Array2::from_elem((h, w), value)
}

/// Add an isotropic Gaussian bump of the given standard deviation (pixels)
/// and peak amplitude, centered on a pixel.
pub fn add_bump(data: &mut Array2<f32>, center: (usize, usize), sigma_px: f64, amplitude: f32) {
    let s2 = 2.0 * sigma_px * sigma_px;
    for ((row, col), v) in data.indexed_iter_mut() {
        let dr = row as f64 - center.0 as f64;
        let dc = col as f64 - center.1 as f64;
        *v += amplitude * (-(dr * dr + dc * dc) / s2).exp() as f32;
    }
}

/// Zero raster with a single Gaussian bump.
pub fn gaussian_bump(
    h: usize,
    w: usize,
    center: (usize, usize),
    sigma_px: f64,
    amplitude: f32,
) -> Array2<f32> {
    let mut data = Array2::<f32>::zeros((h, w));
    add_bump(&mut data, center, sigma_px, amplitude);
    data
}

/// Synthetic NIR imagery with one bright tree-like feature: the red band is
/// a uniform 50, the NIR band adds a Gaussian bump of amplitude 150 on top
/// of that, so the vegetation index peaks at the bump center.
pub fn bump_imagery(h: usize, w: usize, center: (usize, usize), sigma_px: f64) -> NirImagery {
    let mut nir = flat(h, w, 50.0);
    add_bump(&mut nir, center, sigma_px, 150.0);
    let red = flat(h, w, 50.0);
    let green = flat(h, w, 50.0);
    NirImagery::new(nir, red, green).expect("bands share dimensions")
}
