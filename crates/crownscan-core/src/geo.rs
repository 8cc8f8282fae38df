//! Geographic coordinate handling: haversine conversions between meters and
//! lon/lat, bounding box normalization, tile grids, and the pixel-to-world
//! transform attached to every raster.

use crate::consts::EARTH_RADIUS_M;

/// Great-circle distance in meters between two lon/lat coordinates.
pub fn haversine_m(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (lon1, lat1) = (lon1.to_radians(), lat1.to_radians());
    let (lon2, lat2) = (lon2.to_radians(), lat2.to_radians());
    let dlon = lon2 - lon1;
    let dlat = lat2 - lat1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * a.sqrt().asin() * EARTH_RADIUS_M
}

/// Lon/lat coordinate reached by moving `east_m`/`north_m` meters from a
/// starting coordinate (inverse haversine, small-offset approximation).
pub fn offset_lonlat(lon: f64, lat: f64, east_m: f64, north_m: f64) -> (f64, f64) {
    let lon2 = lon + (east_m / EARTH_RADIUS_M).to_degrees() / lat.to_radians().cos();
    let lat2 = lat + (north_m / EARTH_RADIUS_M).to_degrees();
    (lon2, lat2)
}

/// A geographic bounding box in lon/lat.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub lon_min: f64,
    pub lat_min: f64,
    pub lon_max: f64,
    pub lat_max: f64,
}

impl BoundingBox {
    pub fn new(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> Self {
        Self {
            lon_min: lon1,
            lat_min: lat1,
            lon_max: lon2,
            lat_max: lat2,
        }
    }

    /// Reorder the corners so coordinates run from low to high.
    pub fn normalized(&self) -> Self {
        let (lon_min, lon_max) = if self.lon_max < self.lon_min {
            (self.lon_max, self.lon_min)
        } else {
            (self.lon_min, self.lon_max)
        };
        let (lat_min, lat_max) = if self.lat_max < self.lat_min {
            (self.lat_max, self.lat_min)
        } else {
            (self.lat_min, self.lat_max)
        };
        Self {
            lon_min,
            lat_min,
            lon_max,
            lat_max,
        }
    }

    /// East-west extent in meters, measured along the southern edge.
    pub fn width_m(&self) -> f64 {
        haversine_m(self.lon_min, self.lat_min, self.lon_max, self.lat_min)
    }

    /// North-south extent in meters, measured along the western edge.
    pub fn height_m(&self) -> f64 {
        haversine_m(self.lon_min, self.lat_min, self.lon_min, self.lat_max)
    }
}

/// Maps pixel indices to geographic coordinates.
/// Anchored at the southwest corner of the covered area; row 0 is the
/// northern edge.
#[derive(Clone, Copy, Debug)]
pub struct GeoTransform {
    pub origin_lon: f64,
    pub origin_lat: f64,
    /// Ground sampling distance in meters per pixel.
    pub pixel_size: f64,
    /// Raster height in pixels, needed to flip the row axis.
    pub height_px: usize,
}

impl GeoTransform {
    pub fn new(origin_lon: f64, origin_lat: f64, pixel_size: f64, height_px: usize) -> Self {
        Self {
            origin_lon,
            origin_lat,
            pixel_size,
            height_px,
        }
    }

    /// Transform anchored at the southwest corner of `bbox`.
    pub fn from_bbox(bbox: &BoundingBox, pixel_size: f64, height_px: usize) -> Self {
        let bbox = bbox.normalized();
        Self::new(bbox.lon_min, bbox.lat_min, pixel_size, height_px)
    }

    /// Convert a (row, col) pixel position to lon/lat.
    pub fn pixel_to_lonlat(&self, row: f64, col: f64) -> (f64, f64) {
        let east_m = col * self.pixel_size;
        let north_m = (self.height_px as f64 - row) * self.pixel_size;
        offset_lonlat(self.origin_lon, self.origin_lat, east_m, north_m)
    }
}

/// One fetchable sub-area of a larger bounding box.
#[derive(Clone, Debug)]
pub struct Tile {
    /// Deterministic `<col>_<row>` name, used for file naming.
    pub name: String,
    pub col: usize,
    pub row: usize,
    pub bbox: BoundingBox,
}

/// Cut a bounding box into tiles of `tile_size_px` pixels per side at the
/// given ground sampling distance.
///
/// Step counts are the ceiling of the extent in pixels over the tile size,
/// so the grid always covers the full box (the last row/column may extend
/// past it). Tiles are ordered column-major to keep names stable.
pub fn tile_grid(bbox: &BoundingBox, tile_size_px: usize, pixel_size: f64) -> Vec<Tile> {
    let bbox = bbox.normalized();
    let tile_m = tile_size_px as f64 * pixel_size;

    let steps_horizontal = (bbox.width_m() / tile_m).ceil() as usize;
    let steps_vertical = (bbox.height_m() / tile_m).ceil() as usize;

    let (lon_step_end, lat_step_end) = offset_lonlat(bbox.lon_min, bbox.lat_min, tile_m, tile_m);
    let lon_step = lon_step_end - bbox.lon_min;
    let lat_step = lat_step_end - bbox.lat_min;

    let mut tiles = Vec::with_capacity(steps_horizontal * steps_vertical);
    for i in 0..steps_horizontal {
        let lon = bbox.lon_min + i as f64 * lon_step;
        for j in 0..steps_vertical {
            let lat = bbox.lat_min + j as f64 * lat_step;
            tiles.push(Tile {
                name: format!("{i}_{j}"),
                col: i,
                row: j,
                bbox: BoundingBox::new(lon, lat, lon + lon_step, lat + lat_step),
            });
        }
    }
    tiles
}
