// SPDX-License-Identifier: MIT

//! Concurrent reduction of a slice into a single total.
//!
//! The input is split into K contiguous ranges, each range is summed by its
//! own thread without touching shared state, and every partial sum is merged
//! exactly once into a [`SharedTotal`] guarded by a spinlock.

pub mod accumulator;
pub mod coordinator;
pub mod element;
pub mod partition;
pub mod worker;

pub use accumulator::SharedTotal;
pub use coordinator::{run, Coordinator, Reduction, RunPhase};
pub use element::{sequential_sum, Element, Total};
pub use partition::{PartitionPlan, RangeSplitter};
pub use worker::Worker;
