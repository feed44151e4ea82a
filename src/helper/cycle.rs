/// Step back one item, wrapping to the end
pub fn prev(idx: usize, all: usize) -> usize {
    if all == 0 {
        0
    } else {
        idx.checked_sub(1).unwrap_or(all - 1).min(all - 1)
    }
}

/// Step forward one item, wrapping to the start
pub fn next(idx: usize, all: usize) -> usize {
    if all == 0 {
        0
    } else {
        (idx + 1) % all
    }
}
