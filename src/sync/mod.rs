// SPDX-License-Identifier: MIT

pub mod spinlock;

pub use spinlock::{LockStats, SpinLock, SpinLockGuard};
