// SPDX-License-Identifier: MIT

//! Concurrent sum of a large array: K worker threads each sum a contiguous
//! range locally and merge their partial sum into one shared total guarded by
//! a busy-waiting spinlock.

pub mod cli;
pub mod error;
pub mod input;
pub mod reduce;
pub mod sync;
pub mod telemetry;
pub mod timing;

pub use error::{Result, SumError};
pub use reduce::{run, Coordinator, PartitionPlan, Reduction, SharedTotal};
pub use sync::SpinLock;
