// SPDX-License-Identifier: MIT

use crate::error::{Result, SumError};
use std::ops::Range;

/// Splits `0..total_items` into a fixed number of contiguous ranges whose
/// sizes differ by at most one.
///
/// The first `total_items % num_ranges` ranges get one extra item. When there
/// are more ranges than items the trailing ranges are empty, so the iterator
/// always yields exactly `num_ranges` items.
pub struct RangeSplitter {
    /// The current position in the range of items.
    current_position: usize,
    /// The index of the next range to yield.
    current_range_index: usize,
    /// Number of ranges to yield in total.
    num_ranges: usize,
    /// The base size of each range (without considering extra items).
    base_range_size: usize,
    /// The number of extra items to distribute across the first few ranges.
    extra_items: usize,
}

impl RangeSplitter {
    /// Creates a new `RangeSplitter` dividing `total_items` into `num_ranges`.
    ///
    /// # Errors
    /// `InvalidArgument` if `num_ranges` is zero.
    pub fn new(total_items: usize, num_ranges: usize) -> Result<Self> {
        if num_ranges == 0 {
            return Err(SumError::InvalidArgument(
                "number of workers must be at least 1".into(),
            ));
        }
        Ok(RangeSplitter {
            current_position: 0,
            current_range_index: 0,
            num_ranges,
            // Each range gets at least this many items.
            base_range_size: total_items / num_ranges,
            // Remaining items to distribute across the first few ranges.
            extra_items: total_items % num_ranges,
        })
    }
}

impl Iterator for RangeSplitter {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_range_index == self.num_ranges {
            return None;
        }

        let start = self.current_position;
        let end = start
            + self.base_range_size
            + (self.current_range_index < self.extra_items) as usize;

        self.current_range_index += 1;
        self.current_position = end;

        Some(start..end)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.num_ranges - self.current_range_index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RangeSplitter {}

/// Ordered, disjoint ranges covering `0..len` exactly once, one per worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionPlan {
    len: usize,
    ranges: Vec<Range<usize>>,
}

impl PartitionPlan {
    /// Partitions `len` elements among `workers` workers.
    ///
    /// Deterministic: the same `(len, workers)` always yields the same plan.
    pub fn new(len: usize, workers: usize) -> Result<Self> {
        let ranges = RangeSplitter::new(len, workers)?.collect();
        Ok(PartitionPlan { len, ranges })
    }

    /// Number of elements the plan covers.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of ranges, i.e. the degree of parallelism.
    pub fn workers(&self) -> usize {
        self.ranges.len()
    }

    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Range<usize>> {
        self.ranges.iter()
    }
}
