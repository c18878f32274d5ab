//! Static work split across a fixed worker pool.

use std::ops::Range;

/// The contiguous slice of `0..total` owned by worker `id` out of `workers`.
///
/// Computes `[id*total/workers, min((id+1)*total/workers, total))`. Over
/// `id in 0..workers` the ranges cover `0..total` exactly once, in order, and
/// their lengths differ by at most one. Workers beyond `total` get empty ranges.
pub fn partition(id: usize, workers: usize, total: usize) -> Range<usize> {
    debug_assert!(workers > 0 && id < workers);
    // u128 keeps id * total from overflowing for any usize inputs
    let bound = |i: usize| ((i as u128 * total as u128) / workers as u128) as usize;
    let start = bound(id);
    let end = bound(id + 1).min(total);
    start..end
}
