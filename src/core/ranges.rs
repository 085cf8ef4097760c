//! Contiguous-run detection over ordered sequences.

use std::ops::Range;

/// Calls `found(start, end)` for every maximal run in which each item is
/// `are_equal` to its left neighbour, reporting the run only when its last
/// item passes `filter`.
///
/// Only adjacent items are compared, so a non-transitive `are_equal` can
/// chain a run across items that would not match each other directly. Runs
/// are reported left to right and `end` is exclusive.
pub fn find_ranges<T, E, F, C>(items: &[T], are_equal: E, filter: F, mut found: C)
where
    E: Fn(&T, &T) -> bool,
    F: Fn(&T) -> bool,
    C: FnMut(usize, usize),
{
    let Some(last) = items.last() else {
        return;
    };

    let mut start = 0usize;
    for (idx, pair) in items.windows(2).enumerate() {
        if !are_equal(&pair[0], &pair[1]) {
            if filter(&pair[0]) {
                found(start, idx + 1);
            }
            start = idx + 1;
        }
    }

    if filter(last) {
        found(start, items.len());
    }
}

/// Collecting variant of [`find_ranges`].
pub fn collect_ranges<T, E, F>(items: &[T], are_equal: E, filter: F) -> Vec<Range<usize>>
where
    E: Fn(&T, &T) -> bool,
    F: Fn(&T) -> bool,
{
    let mut ranges = Vec::new();
    find_ranges(items, are_equal, filter, |start, end| ranges.push(start..end));
    ranges
}
