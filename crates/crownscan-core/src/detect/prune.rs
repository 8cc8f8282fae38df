use std::cmp::Ordering;

use super::extract::Candidate;

/// Greedy strongest-first overlap suppression.
///
/// Candidates are visited by descending response (ties: larger radius first,
/// then row-major position, making the full order deterministic). A
/// candidate is accepted unless it overlaps an already-accepted detection by
/// at least `overlap_threshold`; rejected candidates are never revisited.
/// Single pass, O(n^2) against the accepted set.
pub fn prune_overlaps(
    mut candidates: Vec<Candidate>,
    overlap_threshold: f32,
    pixel_size: f64,
) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.response
            .partial_cmp(&a.response)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.radius.partial_cmp(&a.radius).unwrap_or(Ordering::Equal))
            .then_with(|| (a.row, a.col).cmp(&(b.row, b.col)))
    });

    let mut accepted: Vec<Candidate> = Vec::with_capacity(candidates.len());
    for cand in candidates {
        let conflicts = accepted
            .iter()
            .any(|det| overlap_fraction(&cand, det, pixel_size) >= overlap_threshold as f64);
        if !conflicts {
            accepted.push(cand);
        }
    }
    accepted
}

/// Overlap fraction of a pair of disks, measured against the smaller one:
/// `(2*r_small - distance) / r_small`.
///
/// Relating the overlap to the smaller disk's own radius means a small blob
/// fully engulfed by a larger one always conflicts, regardless of the larger
/// disk's size, while two similarly-sized disks conflict based on their
/// mutual proximity at their shared scale.
pub fn overlap_fraction(a: &Candidate, b: &Candidate, pixel_size: f64) -> f64 {
    let r_small = a.radius.min(b.radius);
    let dr = a.row as f64 - b.row as f64;
    let dc = a.col as f64 - b.col as f64;
    let distance = (dr * dr + dc * dc).sqrt() * pixel_size;
    (2.0 * r_small - distance) / r_small
}
