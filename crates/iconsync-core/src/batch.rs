//! Chunking for request-size and concurrency limits.

use std::ops::Range;

/// Splits `len` items into consecutive index ranges of at most `size` items.
///
/// Total over all inputs: `len == 0` yields no chunks, `size == 0` is treated as 1.
pub fn chunk_ranges(len: usize, size: usize) -> Vec<Range<usize>> {
    let size = size.max(1);
    (0..len)
        .step_by(size)
        .map(|start| start..(start + size).min(len))
        .collect()
}

/// Number of chunks `chunk_ranges(len, size)` produces.
pub fn chunk_count(len: usize, size: usize) -> usize {
    len.div_ceil(size.max(1))
}
