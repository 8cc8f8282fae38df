use ndarray::{Array2, Zip};

use crate::filters::gaussian::gaussian_smooth;

/// 5-point discrete Laplacian:
///   0  1  0
///   1 -4  1
///   0  1  0
/// Neighbor indices are clamped at the raster edges.
pub fn laplacian(data: &Array2<f32>) -> Array2<f32> {
    let (h, w) = data.dim();
    let mut out = Array2::<f32>::zeros((h, w));
    if h == 0 || w == 0 {
        return out;
    }

    Zip::indexed(out.rows_mut()).for_each(|row, mut dst| {
        let up = row.saturating_sub(1);
        let down = (row + 1).min(h - 1);
        for col in 0..w {
            let left = col.saturating_sub(1);
            let right = (col + 1).min(w - 1);
            dst[col] = data[[up, col]] + data[[down, col]] + data[[row, left]]
                + data[[row, right]]
                - 4.0 * data[[row, col]];
        }
    });
    out
}

/// Scale-normalized Laplacian-of-Gaussian response at one scale.
///
/// The response is negated so that bright blobs of radius ~ sigma*sqrt(2)
/// appear as positive peaks; the sigma^2 factor makes magnitudes comparable
/// across scales, which is what allows a joint maximum search over the whole
/// scale space.
pub fn scale_normalized_log(data: &Array2<f32>, sigma: f32) -> Array2<f32> {
    let smoothed = gaussian_smooth(data, sigma);
    let mut response = laplacian(&smoothed);
    response.mapv_inplace(|v| -v * sigma * sigma);
    response
}
