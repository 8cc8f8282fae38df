mod common;

use common::{add_bump, flat, gaussian_bump};
use crownscan_core::detect::extract_candidates;
use crownscan_core::scale_space::{build_scale_space, ScaleRange};

fn default_range() -> ScaleRange {
    ScaleRange {
        minrad: 3.0,
        maxrad: 9.0,
        steprad: 0.5,
    }
}

// ---------------------------------------------------------------------------
// Flat input
// ---------------------------------------------------------------------------

#[test]
fn test_flat_raster_yields_no_candidates() {
    // A constant raster has zero response everywhere: no local maxima
    // distinguishable from noise, at any nonzero relative threshold.
    let img = flat(32, 32, 0.7);
    let space = build_scale_space(&img, 1.0, &default_range()).unwrap();
    assert!(extract_candidates(&space, 0.1).is_empty());
    assert!(extract_candidates(&space, 0.0025).is_empty());
}

// ---------------------------------------------------------------------------
// Single bump
// ---------------------------------------------------------------------------

#[test]
fn test_single_bump_yields_single_centered_candidate() {
    let img = gaussian_bump(48, 48, (24, 24), 4.0, 1.0);
    let space = build_scale_space(&img, 1.0, &default_range()).unwrap();
    let candidates = extract_candidates(&space, 0.0025);

    assert_eq!(candidates.len(), 1, "got {candidates:?}");
    assert_eq!((candidates[0].row, candidates[0].col), (24, 24));
    assert!(candidates[0].response > 0.0);
}

// ---------------------------------------------------------------------------
// Relative threshold
// ---------------------------------------------------------------------------

#[test]
fn test_raising_threshold_shrinks_candidate_set() {
    // Two bumps of very different strength: the weak one survives a loose
    // threshold but not a strict one.
    let mut img = gaussian_bump(64, 64, (16, 16), 4.0, 1.0);
    add_bump(&mut img, (48, 48), 4.0, 0.2);
    let space = build_scale_space(&img, 1.0, &default_range()).unwrap();

    let loose = extract_candidates(&space, 0.01);
    let strict = extract_candidates(&space, 0.5);

    assert!(strict.len() < loose.len());
    for cand in &strict {
        assert!(
            loose.contains(cand),
            "strict candidate {cand:?} missing from loose set"
        );
    }
}

// ---------------------------------------------------------------------------
// Border exclusion
// ---------------------------------------------------------------------------

#[test]
fn test_border_pixels_are_never_candidates() {
    // A bump pushed into the corner puts its strongest response on the
    // border, which must be excluded from candidacy.
    let img = gaussian_bump(32, 32, (0, 0), 4.0, 1.0);
    let space = build_scale_space(&img, 1.0, &default_range()).unwrap();
    let candidates = extract_candidates(&space, 0.0025);

    for cand in &candidates {
        assert!(cand.row >= 1 && cand.row < 31, "row {}", cand.row);
        assert!(cand.col >= 1 && cand.col < 31, "col {}", cand.col);
    }
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn test_extraction_order_is_reproducible() {
    let mut img = gaussian_bump(64, 64, (20, 20), 4.0, 1.0);
    add_bump(&mut img, (44, 40), 5.0, 0.8);
    let space = build_scale_space(&img, 1.0, &default_range()).unwrap();

    let a = extract_candidates(&space, 0.0025);
    let b = extract_candidates(&space, 0.0025);
    assert_eq!(a, b);
}
