use crownscan_core::detect::{overlap_fraction, prune_overlaps, Candidate};

/// Deterministic pseudo-random candidates (simple LCG, fixed seed).
fn scattered_candidates(count: usize) -> Vec<Candidate> {
    let mut state = 0x2545_f491u64;
    let mut next = || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) as u32
    };
    (0..count)
        .map(|_| Candidate {
            row: (next() % 200) as usize,
            col: (next() % 200) as usize,
            radius: 2.0 + (next() % 80) as f64 / 10.0,
            response: 0.1 + (next() % 1000) as f32 / 1000.0,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Monotonicity
// ---------------------------------------------------------------------------

#[test]
fn test_output_never_larger_than_input() {
    let candidates = scattered_candidates(60);
    let pruned = prune_overlaps(candidates.clone(), 0.5, 1.0);
    assert!(pruned.len() <= candidates.len());
}

#[test]
fn test_higher_threshold_prunes_less() {
    // Raising the overlap threshold toward 1 makes pruning less aggressive:
    // the surviving set can only stay the same size or grow.
    let candidates = scattered_candidates(60);
    let strict = prune_overlaps(candidates.clone(), 0.2, 1.0);
    let loose = prune_overlaps(candidates.clone(), 0.9, 1.0);
    assert!(loose.len() >= strict.len());
}

// ---------------------------------------------------------------------------
// No-overlap invariant
// ---------------------------------------------------------------------------

#[test]
fn test_accepted_pairs_stay_below_threshold() {
    let threshold = 0.5f32;
    let pruned = prune_overlaps(scattered_candidates(80), threshold, 1.0);
    for (i, a) in pruned.iter().enumerate() {
        for b in &pruned[i + 1..] {
            let f = overlap_fraction(a, b, 1.0);
            assert!(
                f < threshold as f64,
                "accepted pair overlaps by {f}: {a:?} / {b:?}"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Conflict resolution
// ---------------------------------------------------------------------------

#[test]
fn test_engulfed_small_blob_is_pruned() {
    // The small disk sits entirely inside the large one; overlap measured
    // against the smaller radius makes this a conflict regardless of how
    // big the large disk is.
    let big = Candidate {
        row: 50,
        col: 50,
        radius: 10.0,
        response: 1.0,
    };
    let small = Candidate {
        row: 52,
        col: 52,
        radius: 2.0,
        response: 0.5,
    };
    let pruned = prune_overlaps(vec![small, big], 0.5, 1.0);
    assert_eq!(pruned, vec![big]);
}

#[test]
fn test_distant_blobs_both_survive() {
    let a = Candidate {
        row: 10,
        col: 10,
        radius: 4.0,
        response: 1.0,
    };
    let b = Candidate {
        row: 100,
        col: 100,
        radius: 4.0,
        response: 0.6,
    };
    let pruned = prune_overlaps(vec![b, a], 0.5, 1.0);
    assert_eq!(pruned.len(), 2);
    // Strongest first in the output.
    assert_eq!(pruned[0], a);
}

#[test]
fn test_stronger_blob_wins_conflict() {
    let strong = Candidate {
        row: 30,
        col: 30,
        radius: 4.0,
        response: 0.9,
    };
    let weak = Candidate {
        row: 31,
        col: 30,
        radius: 4.0,
        response: 0.4,
    };
    let pruned = prune_overlaps(vec![weak, strong], 0.5, 1.0);
    assert_eq!(pruned, vec![strong]);
}

#[test]
fn test_equal_response_tie_broken_by_larger_radius() {
    let large = Candidate {
        row: 40,
        col: 40,
        radius: 6.0,
        response: 0.8,
    };
    let small = Candidate {
        row: 41,
        col: 40,
        radius: 3.0,
        response: 0.8,
    };
    let pruned = prune_overlaps(vec![small, large], 0.5, 1.0);
    assert_eq!(pruned, vec![large]);
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn test_input_order_does_not_affect_output() {
    let candidates = scattered_candidates(40);
    let mut reversed = candidates.clone();
    reversed.reverse();

    let a = prune_overlaps(candidates, 0.5, 1.0);
    let b = prune_overlaps(reversed, 0.5, 1.0);
    assert_eq!(a, b);
}

#[test]
fn test_pixel_size_scales_distances() {
    // Two disks 10 px apart with 2 m radii: at 1 m/px they are disjoint
    // (distance 10 m >= 2 * r_small), at 0.1 m/px they nearly coincide.
    let a = Candidate {
        row: 0,
        col: 0,
        radius: 2.0,
        response: 1.0,
    };
    let b = Candidate {
        row: 0,
        col: 10,
        radius: 2.0,
        response: 0.5,
    };
    assert_eq!(prune_overlaps(vec![a, b], 0.5, 1.0).len(), 2);
    assert_eq!(prune_overlaps(vec![a, b], 0.5, 0.1).len(), 1);
}
