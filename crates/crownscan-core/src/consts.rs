/// Minimum pixel count (h*w) to use row-level Rayon parallelism in filters.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// `minrad` must span at least this many pixels at the active ground
/// sampling distance; smaller filters are under-sampled and unstable.
pub const MIN_RADIUS_PIXELS: f64 = 3.0;

/// Tolerance, in units of `steprad`, when deciding whether the top of the
/// scale range is still included. Guards against floating accumulation.
pub const SCALE_STEP_EPSILON: f64 = 1e-6;

/// Small epsilon to avoid division by zero in vegetation index denominators.
pub const EPSILON: f32 = 1e-10;

/// Mean Earth radius in meters, for haversine conversions.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Pixels this close to the raster border are never blob candidates:
/// filter responses are unreliable there.
pub const BORDER_MARGIN_PX: usize = 1;

/// Default smallest tree-crown radius to search for (meters).
pub const DEFAULT_MIN_RADIUS_M: f64 = 2.5;

/// Default largest tree-crown radius to search for (meters).
pub const DEFAULT_MAX_RADIUS_M: f64 = 20.0;

/// Default scale sampling step (meters).
pub const DEFAULT_STEP_RADIUS_M: f64 = 0.5;

/// Default relative threshold for scale-space peaks, as a fraction of the
/// strongest response in the volume.
pub const DEFAULT_PEAK_THRESHOLD_REL: f32 = 0.0025;

/// Default overlap fraction above which the weaker of two blobs is pruned.
pub const DEFAULT_OVERLAP_THRESHOLD: f32 = 0.5;

/// Default ground sampling distance (meters per pixel).
pub const DEFAULT_PIXEL_SIZE_M: f64 = 0.25;

/// Default edge length (pixels) of a fetched tile.
pub const DEFAULT_TILE_SIZE_PX: usize = 1000;

/// Default sensor maximum for normalizing raw 8-bit NIR samples.
pub const DEFAULT_NIR_MAX_VALUE: f32 = 255.0;

/// Soil adjustment factor for SAVI.
pub const SAVI_SOIL_FACTOR: f32 = 0.5;

/// Atmospheric resistance coefficient for EVI2 (MODIS algorithm).
pub const EVI2_ATMOSPHERE_COEFF: f32 = 2.4;

/// Canopy background adjustment for EVI2 (MODIS algorithm).
pub const EVI2_CANOPY_FACTOR: f32 = 1.0;

/// Overall gain factor for EVI2 (MODIS algorithm).
pub const EVI2_GAIN: f32 = 2.5;
