//! Fixed-stride partitioning of a sample buffer.

use std::ops::Range;

/// Split `total` samples into contiguous, non-overlapping ranges of
/// `chunk_size`, starting at index 0. The final range may be shorter.
/// An empty buffer yields no ranges. `chunk_size` must be non-zero.
pub fn partition(total: usize, chunk_size: usize) -> Vec<Range<usize>> {
    debug_assert!(chunk_size > 0, "chunk_size must be positive");
    (0..total)
        .step_by(chunk_size)
        .map(|start| start..(start + chunk_size).min(total))
        .collect()
}
