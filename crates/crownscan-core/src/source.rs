//! The imagery fetch boundary. The detection core never performs I/O;
//! everything about where tiles come from lives behind [`RasterSource`].

use std::path::PathBuf;

use tracing::debug;

use crate::error::{CrownScanError, Result};
use crate::geo::Tile;
use crate::io::imagery::{load_imagery, save_imagery};
use crate::raster::NirImagery;

const TILE_EXTENSIONS: [&str; 3] = ["png", "tif", "tiff"];

/// Supplies the NIR imagery covering one tile of the analyzed area.
///
/// Implementations own all fetch concerns (disk layout, caching, and any
/// future remote protocol with its retry policy). A returned tile must match
/// the requested pixel size exactly; anything else is a typed failure.
pub trait RasterSource: Sync {
    fn fetch(&self, tile: &Tile, size_px: usize) -> Result<NirImagery>;

    /// Short human-readable name for logging.
    fn name(&self) -> &str;
}

/// Reads pre-fetched tiles (`<name>.png`, `.tif` or `.tiff`) from a
/// directory.
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl RasterSource for DirectorySource {
    fn fetch(&self, tile: &Tile, size_px: usize) -> Result<NirImagery> {
        for ext in TILE_EXTENSIONS {
            let path = self.root.join(format!("{}.{ext}", tile.name));
            if path.exists() {
                return check_size(load_imagery(&path)?, size_px);
            }
        }
        Err(CrownScanError::TileUnavailable(format!(
            "no image for tile {} under {}",
            tile.name,
            self.root.display()
        )))
    }

    fn name(&self) -> &str {
        "directory"
    }
}

/// Disk cache in front of another source: hits load from `cache_dir`,
/// misses are fetched from the inner source and saved for next time.
pub struct CachedSource<S: RasterSource> {
    inner: S,
    cache_dir: PathBuf,
}

impl<S: RasterSource> CachedSource<S> {
    pub fn new(inner: S, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            cache_dir: cache_dir.into(),
        }
    }

    fn cache_path(&self, tile: &Tile) -> PathBuf {
        self.cache_dir.join(format!("{}.png", tile.name))
    }
}

impl<S: RasterSource> RasterSource for CachedSource<S> {
    fn fetch(&self, tile: &Tile, size_px: usize) -> Result<NirImagery> {
        let path = self.cache_path(tile);
        if path.exists() {
            debug!(tile = %tile.name, "tile cache hit");
            return check_size(load_imagery(&path)?, size_px);
        }

        let imagery = self.inner.fetch(tile, size_px)?;
        std::fs::create_dir_all(&self.cache_dir)?;
        save_imagery(&imagery, &path)?;
        debug!(tile = %tile.name, path = %path.display(), "tile cached");
        Ok(imagery)
    }

    fn name(&self) -> &str {
        "cached"
    }
}

fn check_size(imagery: NirImagery, size_px: usize) -> Result<NirImagery> {
    let (rows, cols) = imagery.dim();
    if rows != size_px || cols != size_px {
        return Err(CrownScanError::ShapeMismatch {
            expected_rows: size_px,
            expected_cols: size_px,
            rows,
            cols,
        });
    }
    Ok(imagery)
}
