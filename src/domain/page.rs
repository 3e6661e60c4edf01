//! Page arithmetic shared by entry lists and articles.
//!
//! A position is a zero-based page index. For a sequence of `len` items the
//! valid positions are `0..=max(len - 1, 0) / page_size`; an empty sequence
//! only has position 0.

use std::ops::Range;

/// Index range of the items shown on page `position`.
pub fn page_range(position: usize, page_size: usize, len: usize) -> Range<usize> {
    let start = position.saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Number of pages needed for `len` items. An empty sequence still has one
/// (empty) page.
pub fn page_count(page_size: usize, len: usize) -> usize {
    if len == 0 {
        1
    } else {
        len.div_ceil(page_size)
    }
}

pub fn has_next_page(position: usize, page_size: usize, len: usize) -> bool {
    (position + 1).saturating_mul(page_size) < len
}

/// Pull `position` back onto the last valid page after the sequence shrank.
pub fn settle(position: usize, page_size: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        position.min((len - 1) / page_size)
    }
}

pub fn is_valid(position: usize, page_size: usize, len: usize) -> bool {
    if len == 0 {
        position == 0
    } else {
        position.saturating_mul(page_size) < len
    }
}
