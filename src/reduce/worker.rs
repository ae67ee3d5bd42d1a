// SPDX-License-Identifier: MIT

use super::accumulator::SharedTotal;
use super::element::{sequential_sum, Element};
use crate::error::{Result, SumError};
use std::ops::Range;

/// One logical worker of a reduction: an id and the range it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worker {
    id: usize,
    range: Range<usize>,
}

impl Worker {
    pub fn new(id: usize, range: Range<usize>) -> Self {
        Worker { id, range }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn range(&self) -> &Range<usize> {
        &self.range
    }

    /// Sums the worker's range left to right without touching shared state.
    ///
    /// # Errors
    /// `WorkerFailure` if the range does not lie within `input`.
    pub fn local_sum<E: Element>(&self, input: &[E]) -> Result<E::Total> {
        let slice = input.get(self.range.clone()).ok_or_else(|| {
            self.failure(format!(
                "range out of bounds for input of {} elements",
                input.len()
            ))
        })?;
        Ok(sequential_sum(slice))
    }

    /// Computes the local sum, then merges it into `total`.
    ///
    /// The merge is the only point where the worker synchronizes. An empty
    /// range still merges, contributing zero.
    pub fn run<E: Element>(
        &self,
        input: &[E],
        total: &SharedTotal<E::Total>,
    ) -> Result<E::Total> {
        let partial = self.local_sum(input)?;
        total.merge(partial);
        tracing::trace!(
            worker = self.id,
            range = ?self.range,
            %partial,
            "merged partial sum"
        );
        Ok(partial)
    }

    pub(crate) fn failure(&self, reason: String) -> SumError {
        SumError::WorkerFailure {
            worker: self.id,
            range: self.range.clone(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_sum_of_range() {
        let input: Vec<u32> = (0..10).collect();
        let worker = Worker::new(1, 2..5);
        assert_eq!(worker.local_sum(&input).unwrap(), 2 + 3 + 4);
    }

    #[test]
    fn test_empty_range_merges_zero() {
        let input = vec![7i32; 4];
        let total = SharedTotal::new();
        let worker = Worker::new(3, 4..4);

        assert_eq!(worker.run(&input, &total).unwrap(), 0);
        assert_eq!(total.merges(), 1);
        assert_eq!(total.into_total(), 0);
    }

    #[test]
    fn test_out_of_range_fails_without_merging() {
        let input = vec![1u8; 4];
        let total = SharedTotal::new();
        let worker = Worker::new(0, 2..9);

        let err = worker.run(&input, &total).unwrap_err();
        assert!(matches!(
            err,
            SumError::WorkerFailure { worker: 0, ref range, .. } if *range == (2..9)
        ));
        assert_eq!(total.merges(), 0);
    }
}
