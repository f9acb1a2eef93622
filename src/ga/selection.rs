//! Parent selection.

use rand::Rng;

/// Tournament selection over a penalty vector (lower is better).
///
/// Samples `size` contestants uniformly with replacement and returns the
/// index of the one with the lowest penalty. Ties between distinct
/// contestants are broken uniformly at random.
///
/// `penalties` must be non-empty; a `size` of 0 is treated as 1.
pub fn tournament_select<R: Rng>(penalties: &[f64], size: usize, rng: &mut R) -> usize {
    let n = penalties.len();
    let mut best = rng.random_range(0..n);
    let mut tied = vec![best];

    for _ in 1..size.max(1) {
        let idx = rng.random_range(0..n);
        if penalties[idx] < penalties[best] {
            best = idx;
            tied.clear();
            tied.push(idx);
        } else if penalties[idx] == penalties[best] && !tied.contains(&idx) {
            tied.push(idx);
        }
    }

    if tied.len() == 1 {
        tied[0]
    } else {
        tied[rng.random_range(0..tied.len())]
    }
}
