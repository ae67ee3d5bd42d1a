// SPDX-License-Identifier: MIT

use std::ops::Range;

/// Asserts that `ranges` are in order, disjoint, and cover `0..len` exactly
/// once.
pub fn assert_exact_cover(ranges: &[Range<usize>], len: usize) {
    let mut expected_start = 0;
    for (index, range) in ranges.iter().enumerate() {
        assert_eq!(
            range.start, expected_start,
            "range {index} ({range:?}) leaves a gap or overlaps"
        );
        assert!(range.start <= range.end, "range {index} is inverted");
        expected_start = range.end;
    }
    assert_eq!(expected_start, len, "ranges do not reach the end");
}

/// Asserts that range sizes differ by at most one and that larger ranges come
/// first.
pub fn assert_balanced(ranges: &[Range<usize>]) {
    for pair in ranges.windows(2) {
        let (first, second) = (pair[0].len(), pair[1].len());
        assert!(
            first == second || first == second + 1,
            "unbalanced neighbours {:?} and {:?}",
            pair[0],
            pair[1]
        );
    }
    if let (Some(first), Some(last)) = (ranges.first(), ranges.last()) {
        assert!(first.len() - last.len() <= 1);
    }
}
