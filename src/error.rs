// SPDX-License-Identifier: MIT

use std::ops::Range;
use thiserror::Error;

/// Errors that end a reduction run.
///
/// Every variant is local to a single run: it is reported once and the
/// process exits. Retrying is left to whoever invoked the process.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SumError {
    /// N or K failed to parse, or was zero.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A worker could not complete its assigned range.
    #[error("worker {worker} failed on range {range:?}: {reason}")]
    WorkerFailure {
        worker: usize,
        range: Range<usize>,
        reason: String,
    },

    /// The input array could not be allocated.
    #[error("failed to allocate input array of {len} elements")]
    Allocation { len: usize },

    /// The concurrent total disagrees with the expected total.
    #[error("verification failed: expected {expected}, got {actual}")]
    VerificationMismatch { expected: String, actual: String },

    /// The timing report could not be written.
    #[error("failed to write report: {0}")]
    Report(String),
}

impl SumError {
    /// Process exit code for this error. Never zero.
    pub fn exit_code(&self) -> u8 {
        match self {
            SumError::InvalidArgument(_) => 2,
            SumError::WorkerFailure { .. } => 3,
            SumError::Allocation { .. } => 4,
            SumError::VerificationMismatch { .. } => 5,
            SumError::Report(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_and_nonzero() {
        let errors = [
            SumError::InvalidArgument("k".into()),
            SumError::WorkerFailure {
                worker: 0,
                range: 0..1,
                reason: "boom".into(),
            },
            SumError::Allocation { len: 1 },
            SumError::VerificationMismatch {
                expected: "1".into(),
                actual: "2".into(),
            },
            SumError::Report("broken pipe".into()),
        ];

        let mut codes: Vec<u8> = errors.iter().map(SumError::exit_code).collect();
        assert!(codes.iter().all(|&code| code != 0));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_worker_failure_names_range() {
        let err = SumError::WorkerFailure {
            worker: 2,
            range: 6..9,
            reason: "index out of bounds".into(),
        };
        assert_eq!(
            err.to_string(),
            "worker 2 failed on range 6..9: index out of bounds"
        );
    }
}
