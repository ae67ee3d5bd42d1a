// SPDX-License-Identifier: MIT

use super::accumulator::SharedTotal;
use super::element::Element;
use super::partition::PartitionPlan;
use super::worker::Worker;
use crate::error::{Result, SumError};
use std::any::Any;
use std::thread;
use tracing::{debug, info};

/// Lifecycle of one reduction run, logged as it advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Partitioning,
    Reducing,
    Joined,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reduction<T> {
    /// Final value of the shared accumulator.
    pub total: T,
    /// Number of partial sums merged; equals the number of workers.
    pub merges: u64,
    /// Merges that had to spin for the lock.
    pub contended: u64,
}

/// Runs one reduction over a fixed partition plan.
///
/// Spawns one thread per range, all borrowing the same input and the same
/// [`SharedTotal`]. Every thread is joined before the total is read, so every
/// merge is visible to the final read.
pub struct Coordinator {
    plan: PartitionPlan,
}

impl Coordinator {
    pub fn new(plan: PartitionPlan) -> Self {
        Coordinator { plan }
    }

    /// Partitions `len` elements among `workers` workers.
    pub fn for_len(len: usize, workers: usize) -> Result<Self> {
        debug!(phase = ?RunPhase::Partitioning, len, workers);
        Ok(Coordinator::new(PartitionPlan::new(len, workers)?))
    }

    pub fn plan(&self) -> &PartitionPlan {
        &self.plan
    }

    /// Sums `input` with one worker per range of the plan.
    ///
    /// # Errors
    /// `InvalidArgument` if the plan does not cover exactly `input.len()`
    /// elements. `WorkerFailure` for the first failing worker (lowest id).
    /// Partial results of the other workers are discarded.
    pub fn reduce<E: Element>(&self, input: &[E]) -> Result<Reduction<E::Total>> {
        if self.plan.len() != input.len() {
            return Err(SumError::InvalidArgument(format!(
                "partition covers {} elements but input has {}",
                self.plan.len(),
                input.len()
            )));
        }
        let shared = SharedTotal::<E::Total>::new();
        debug!(phase = ?RunPhase::Reducing, workers = self.plan.workers());

        let outcomes: Vec<Result<E::Total>> = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(self.plan.workers());
            let mut outcomes = Vec::new();

            for (id, range) in self.plan.iter().enumerate() {
                let worker = Worker::new(id, range.clone());
                let shared = &shared;
                let spawned = thread::Builder::new()
                    .name(format!("sum-worker-{id}"))
                    .spawn_scoped(scope, {
                        let worker = worker.clone();
                        move || worker.run(input, shared)
                    });

                match spawned {
                    Ok(handle) => handles.push((worker, handle)),
                    Err(err) => {
                        outcomes.push(Err(
                            worker.failure(format!("failed to spawn thread: {err}"))
                        ));
                        break;
                    }
                }
            }

            // Join everything that was started, even after a spawn failure.
            let mut joined: Vec<Result<E::Total>> = handles
                .into_iter()
                .map(|(worker, handle)| {
                    let outcome = handle.join().unwrap_or_else(|payload| {
                        Err(worker.failure(panic_message(payload.as_ref())))
                    });
                    debug!(
                        worker = worker.id(),
                        range = ?worker.range(),
                        ok = outcome.is_ok(),
                        "worker joined"
                    );
                    outcome
                })
                .collect();
            joined.append(&mut outcomes);
            joined
        });
        debug!(phase = ?RunPhase::Joined, workers = outcomes.len());

        if let Some(err) = outcomes.into_iter().find_map(|outcome| outcome.err()) {
            return Err(err);
        }

        let stats = shared.lock_stats();
        let merges = shared.merges();
        let total = shared.into_total();
        info!(
            len = self.plan.len(),
            workers = self.plan.workers(),
            merges,
            contended = stats.contended,
            %total,
            "reduction complete"
        );

        Ok(Reduction {
            total,
            merges,
            contended: stats.contended,
        })
    }
}

/// Sums `input` with `workers` concurrent workers.
///
/// # Errors
/// `InvalidArgument` if `workers` is zero, `WorkerFailure` if any worker
/// cannot complete its range.
pub fn run<E: Element>(input: &[E], workers: usize) -> Result<E::Total> {
    Coordinator::for_len(input.len(), workers)?
        .reduce(input)
        .map(|reduction| reduction.total)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("worker panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("worker panicked: {message}")
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_functionality_all_ones() {
        let input = vec![1u32; 1000];
        let reduction = Coordinator::for_len(input.len(), 4)
            .unwrap()
            .reduce(&input)
            .unwrap();

        assert_eq!(reduction.total, 1000);
        assert_eq!(reduction.merges, 4);
    }

    #[test]
    fn test_worker_count_does_not_change_integer_total() {
        let input: Vec<i32> = (0..100_003).map(|i| (i % 201) - 100).collect();
        let expected = run(&input, 1).unwrap();

        for workers in [2, 3, 4, 7, 8, 16, 33] {
            assert_eq!(run(&input, workers).unwrap(), expected);
        }
    }

    #[test]
    fn test_more_workers_than_elements() {
        let input = vec![5u8; 3];
        let reduction = Coordinator::for_len(input.len(), 8)
            .unwrap()
            .reduce(&input)
            .unwrap();

        assert_eq!(reduction.total, 15);
        assert_eq!(reduction.merges, 8);
    }

    #[test]
    fn test_empty_input_is_zero() {
        for workers in [1, 2, 16] {
            assert_eq!(run::<i64>(&[], workers).unwrap(), 0);
        }
    }

    #[test]
    fn test_single_worker_has_no_contention() {
        let input = vec![2i8; 10_000];
        let reduction = Coordinator::for_len(input.len(), 1)
            .unwrap()
            .reduce(&input)
            .unwrap();

        assert_eq!(reduction.total, 20_000);
        assert_eq!(reduction.contended, 0);
    }

    #[test]
    fn test_zero_workers_is_invalid() {
        assert!(matches!(
            run(&[1u32, 2, 3], 0),
            Err(SumError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_plan_longer_than_input_is_invalid() {
        let input = vec![1u64; 6];
        let coordinator = Coordinator::new(PartitionPlan::new(9, 3).unwrap());

        let err = coordinator.reduce(&input).unwrap_err();
        assert!(matches!(err, SumError::InvalidArgument(_)));
    }

    #[test]
    fn test_plan_shorter_than_input_is_invalid() {
        let input = vec![1u64; 10];
        let coordinator = Coordinator::new(PartitionPlan::new(3, 1).unwrap());

        let err = coordinator.reduce(&input).unwrap_err();
        assert!(matches!(err, SumError::InvalidArgument(_)));
    }

    #[test]
    fn test_panicking_worker_is_reported() {
        #[derive(Clone, Copy)]
        struct Poisoned(u32);

        impl Element for Poisoned {
            type Total = u64;

            fn widen(self) -> u64 {
                assert_ne!(self.0, 13, "poisoned element");
                self.0 as u64
            }
        }

        let mut input = vec![Poisoned(1); 40];
        input[25] = Poisoned(13);

        let err = run(&input, 4).unwrap_err();
        match err {
            SumError::WorkerFailure {
                worker,
                range,
                reason,
            } => {
                assert_eq!(worker, 2);
                assert_eq!(range, 20..30);
                assert!(reason.contains("poisoned element"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_float_total_within_tolerance() {
        let input: Vec<f64> = (0..10_000).map(|i| i as f64 * 0.1).collect();
        let expected: f64 = input.iter().sum();

        for workers in [1, 4, 16] {
            let total = run(&input, workers).unwrap();
            assert!((total - expected).abs() < 1e-6 * expected.abs());
        }
    }
}
