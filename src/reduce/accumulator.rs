// SPDX-License-Identifier: MIT

use super::element::Total;
use crate::sync::{LockStats, SpinLock};

/// Running total shared by all workers of one run.
///
/// Owns both the numeric cell and the spinlock guarding it. Workers borrow
/// it; it is never cloned. At any instant the value equals the sum of the
/// partials merged so far.
pub struct SharedTotal<T> {
    cell: SpinLock<Accumulated<T>>,
}

#[derive(Default)]
struct Accumulated<T> {
    value: T,
    merges: u64,
}

impl<T: Total> SharedTotal<T> {
    /// Creates an accumulator at the additive identity.
    pub fn new() -> Self {
        SharedTotal {
            cell: SpinLock::new(Accumulated::default()),
        }
    }

    /// Adds `partial` to the total under the lock.
    pub fn merge(&self, partial: T) {
        let mut total = self.cell.lock();
        total.value = total.value + partial;
        total.merges += 1;
    }

    /// Number of merges performed so far.
    pub fn merges(&self) -> u64 {
        self.cell.lock().merges
    }

    pub fn lock_stats(&self) -> LockStats {
        self.cell.stats()
    }

    pub fn into_total(self) -> T {
        self.cell.into_inner().value
    }
}

impl<T: Total> Default for SharedTotal<T> {
    fn default() -> Self {
        SharedTotal::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_merges_are_not_lost() {
        let total = SharedTotal::<u64>::new();

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..1_000 {
                        total.merge(3);
                    }
                });
            }
        });

        assert_eq!(total.merges(), 8_000);
        assert_eq!(total.into_total(), 24_000);
    }

    #[test]
    fn test_merging_zero_counts_as_merge() {
        let total = SharedTotal::<i64>::default();
        total.merge(0);
        assert_eq!(total.merges(), 1);
        assert_eq!(total.into_total(), 0);
    }
}
