mod common;

use common::{flat, gaussian_bump};
use crownscan_core::error::CrownScanError;
use crownscan_core::scale_space::{build_scale_space, ScaleRange};

// ---------------------------------------------------------------------------
// Radius sampling
// ---------------------------------------------------------------------------

#[test]
fn test_radii_inclusive_count() {
    // (20 - 2.5) / 0.5 + 1 = 36 levels, endpoint included.
    let range = ScaleRange {
        minrad: 2.5,
        maxrad: 20.0,
        steprad: 0.5,
    };
    let radii = range.radii();
    assert_eq!(radii.len(), 36);
    assert!((radii[0] - 2.5).abs() < 1e-12);
    assert!((radii[35] - 20.0).abs() < 1e-12);
}

#[test]
fn test_radii_tolerate_floating_accumulation() {
    // (2.0 - 1.0) / 0.1 lands just below 10 in floating point; the epsilon
    // tolerance must still include the top level.
    let range = ScaleRange {
        minrad: 1.0,
        maxrad: 2.0,
        steprad: 0.1,
    };
    assert_eq!(range.radii().len(), 11);
}

#[test]
fn test_radii_single_level() {
    let range = ScaleRange {
        minrad: 4.0,
        maxrad: 4.0,
        steprad: 1.0,
    };
    let radii = range.radii();
    assert_eq!(radii.len(), 1);
    assert!((radii[0] - 4.0).abs() < 1e-12);
}

#[test]
fn test_radii_strictly_increasing() {
    let range = ScaleRange {
        minrad: 3.0,
        maxrad: 9.0,
        steprad: 0.7,
    };
    let radii = range.radii();
    for pair in radii.windows(2) {
        assert!(pair[1] > pair[0]);
    }
    assert!(*radii.last().unwrap() <= 9.0 + 1e-9);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_validate_rejects_nonpositive_minrad() {
    let range = ScaleRange {
        minrad: 0.0,
        maxrad: 10.0,
        steprad: 0.5,
    };
    assert!(matches!(
        range.validate(0.25),
        Err(CrownScanError::InvalidParameter(_))
    ));
}

#[test]
fn test_validate_rejects_nonpositive_steprad() {
    let range = ScaleRange {
        minrad: 2.5,
        maxrad: 10.0,
        steprad: 0.0,
    };
    assert!(matches!(
        range.validate(0.25),
        Err(CrownScanError::InvalidParameter(_))
    ));
}

#[test]
fn test_validate_rejects_inverted_range() {
    let range = ScaleRange {
        minrad: 12.0,
        maxrad: 10.0,
        steprad: 0.5,
    };
    assert!(matches!(
        range.validate(0.25),
        Err(CrownScanError::InvalidParameter(_))
    ));
}

#[test]
fn test_validate_rejects_undersampled_minrad() {
    // 2.5 m at 1 m/px is only 2.5 pixels — below the 3-pixel floor.
    let range = ScaleRange {
        minrad: 2.5,
        maxrad: 10.0,
        steprad: 0.5,
    };
    assert!(matches!(
        range.validate(1.0),
        Err(CrownScanError::InvalidParameter(_))
    ));
    // The same radii are fine at a finer ground sampling distance.
    assert!(range.validate(0.25).is_ok());
}

// ---------------------------------------------------------------------------
// build_scale_space
// ---------------------------------------------------------------------------

#[test]
fn test_build_level_count_and_order() {
    let img = flat(16, 16, 0.5);
    let range = ScaleRange {
        minrad: 3.0,
        maxrad: 6.0,
        steprad: 0.5,
    };
    let space = build_scale_space(&img, 1.0, &range).unwrap();
    assert_eq!(space.len(), 7);
    let levels = space.levels();
    for pair in levels.windows(2) {
        assert!(pair[1].radius > pair[0].radius);
    }
    assert_eq!(levels[0].response.dim(), (16, 16));
}

#[test]
fn test_build_is_deterministic() {
    let img = gaussian_bump(32, 32, (16, 16), 3.0, 1.0);
    let range = ScaleRange {
        minrad: 3.0,
        maxrad: 7.0,
        steprad: 1.0,
    };
    let a = build_scale_space(&img, 1.0, &range).unwrap();
    let b = build_scale_space(&img, 1.0, &range).unwrap();
    for (la, lb) in a.levels().iter().zip(b.levels()) {
        assert_eq!(la.radius, lb.radius);
        assert_eq!(la.response, lb.response);
    }
}

#[test]
fn test_scale_normalization_peaks_at_feature_scale() {
    // A Gaussian bump of std s responds strongest at the level targeting
    // radius s*sqrt(2); without scale normalization the largest level would
    // always win.
    let sigma_px = 4.0;
    let img = gaussian_bump(64, 64, (32, 32), sigma_px, 1.0);
    let range = ScaleRange {
        minrad: 3.0,
        maxrad: 12.0,
        steprad: 0.5,
    };
    let space = build_scale_space(&img, 1.0, &range).unwrap();

    let best = space
        .levels()
        .iter()
        .max_by(|a, b| {
            a.response[[32, 32]]
                .partial_cmp(&b.response[[32, 32]])
                .unwrap()
        })
        .unwrap();
    let expected = sigma_px * std::f64::consts::SQRT_2;
    assert!(
        (best.radius - expected).abs() <= 0.5,
        "peak at radius {}, expected ~{expected}",
        best.radius
    );
}
