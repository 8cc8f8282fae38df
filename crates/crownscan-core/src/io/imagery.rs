use std::path::Path;

use image::{DynamicImage, Rgb};
use ndarray::Array2;

use crate::error::Result;
use crate::raster::NirImagery;

/// Load a false-colour NIR tile image into its three bands.
///
/// Channel order follows the imagery convention: 0 = near-infrared,
/// 1 = red, 2 = green. Sample values keep their native range (0..255 for
/// 8-bit sources, 0..65535 for 16-bit) so that the configured sensor
/// maximum stays meaningful.
pub fn load_imagery(path: &Path) -> Result<NirImagery> {
    let img = image::open(path)?;
    match img {
        DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_) => {
            let buf = img.to_rgb16();
            let (w, h) = buf.dimensions();
            let band = |channel: usize| {
                Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
                    buf.get_pixel(col as u32, row as u32).0[channel] as f32
                })
            };
            NirImagery::new(band(0), band(1), band(2))
        }
        _ => {
            let buf = img.to_rgb8();
            let (w, h) = buf.dimensions();
            let band = |channel: usize| {
                Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
                    buf.get_pixel(col as u32, row as u32).0[channel] as f32
                })
            };
            NirImagery::new(band(0), band(1), band(2))
        }
    }
}

/// Save NIR imagery as a 16-bit RGB PNG, preserving raw sample values.
/// Round-trips through [`load_imagery`] without loss for integer-valued
/// bands, which is what the tile cache relies on.
pub fn save_imagery(imagery: &NirImagery, path: &Path) -> Result<()> {
    let h = imagery.height();
    let w = imagery.width();

    let mut pixels: Vec<u16> = Vec::with_capacity(h * w * 3);
    for row in 0..h {
        for col in 0..w {
            for band in [&imagery.nir, &imagery.red, &imagery.green] {
                pixels.push(band[[row, col]].round().clamp(0.0, 65535.0) as u16);
            }
        }
    }

    let img = image::ImageBuffer::<Rgb<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .expect("buffer size matches dimensions");
    img.save(path)?;
    Ok(())
}
