use crate::consts::BORDER_MARGIN_PX;
use crate::scale_space::{ScaleLevel, ScaleSpace};

/// A local maximum in the (row, column, scale) response volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub row: usize,
    pub col: usize,
    /// Radius of the scale level the maximum was found at, in meters.
    pub radius: f64,
    pub response: f32,
}

/// Scan the scale space for local maxima and keep those whose response
/// reaches `threshold_rel` times the strongest response in the volume.
///
/// A point is a local maximum when its response is >= every existing
/// neighbor in the 26-neighborhood: the 8 spatial neighbors at its own
/// scale plus the 3x3 patches at the scales immediately above and below
/// (boundary scales use only the side that exists). The volume is scanned
/// in a fixed scale-major, row-major order, so the output order is
/// reproducible.
///
/// Pixels within one pixel of the raster border are never candidates.
pub fn extract_candidates(space: &ScaleSpace, threshold_rel: f32) -> Vec<Candidate> {
    let levels = space.levels();
    if levels.is_empty() {
        return Vec::new();
    }
    let (h, w) = levels[0].response.dim();
    if h < 2 * BORDER_MARGIN_PX + 1 || w < 2 * BORDER_MARGIN_PX + 1 {
        return Vec::new();
    }

    // A featureless raster has zero response everywhere and no usable peaks.
    let global_max = levels
        .iter()
        .flat_map(|l| l.response.iter())
        .cloned()
        .fold(f32::NEG_INFINITY, f32::max);
    if global_max <= 0.0 {
        return Vec::new();
    }
    let floor = threshold_rel * global_max;

    let mut candidates = Vec::new();
    for (s, level) in levels.iter().enumerate() {
        for row in BORDER_MARGIN_PX..h - BORDER_MARGIN_PX {
            for col in BORDER_MARGIN_PX..w - BORDER_MARGIN_PX {
                let value = level.response[[row, col]];
                if value <= 0.0 || value < floor {
                    continue;
                }
                if is_local_maximum(levels, s, row, col, value) {
                    candidates.push(Candidate {
                        row,
                        col,
                        radius: level.radius,
                        response: value,
                    });
                }
            }
        }
    }
    candidates
}

fn is_local_maximum(levels: &[ScaleLevel], s: usize, row: usize, col: usize, value: f32) -> bool {
    let lo = s.saturating_sub(1);
    let hi = (s + 1).min(levels.len() - 1);

    for (offset, level) in levels[lo..=hi].iter().enumerate() {
        let level_idx = lo + offset;
        for dr in -1i64..=1 {
            for dc in -1i64..=1 {
                if level_idx == s && dr == 0 && dc == 0 {
                    continue;
                }
                let r = (row as i64 + dr) as usize;
                let c = (col as i64 + dc) as usize;
                if value < level.response[[r, c]] {
                    return false;
                }
            }
        }
    }
    true
}
