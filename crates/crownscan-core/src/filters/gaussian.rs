use ndarray::{Array2, ArrayView1, ArrayViewMut1, Zip};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Smooth a raster with a separable Gaussian, kernel truncated at 3 sigma.
/// Borders are handled by edge replication.
pub fn gaussian_smooth(data: &Array2<f32>, sigma: f32) -> Array2<f32> {
    let kernel = gaussian_kernel(sigma);
    let row_pass = convolve_rows(data, &kernel);
    // Column pass = row pass over the transposed array.
    convolve_rows(&row_pass.t().to_owned(), &kernel).t().to_owned()
}

fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil() as usize;
    let size = 2 * radius + 1;
    let s2 = 2.0 * sigma * sigma;
    let mut kernel = vec![0.0f32; size];
    let mut sum = 0.0f32;

    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-x * x / s2).exp();
        sum += *k;
    }
    for v in &mut kernel {
        *v /= sum;
    }
    kernel
}

/// Convolve every row with a 1-D kernel, clamping source indices at the
/// edges. Rows are processed in parallel for large rasters.
fn convolve_rows(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() as isize / 2;
    let mut out = Array2::<f32>::zeros((h, w));

    let pass = |src: ArrayView1<f32>, mut dst: ArrayViewMut1<f32>| {
        for col in 0..w {
            let mut acc = 0.0f32;
            for (k, &kv) in kernel.iter().enumerate() {
                let idx = (col as isize + k as isize - radius).clamp(0, w as isize - 1) as usize;
                acc += src[idx] * kv;
            }
            dst[col] = acc;
        }
    };

    let zip = Zip::from(data.rows()).and(out.rows_mut());
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(pass);
    } else {
        zip.for_each(pass);
    }
    out
}
