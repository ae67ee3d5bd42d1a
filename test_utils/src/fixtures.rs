// SPDX-License-Identifier: MIT

use spinsum::input::{MAX_VALUE, MIN_VALUE};
use spinsum::reduce::Element;
use spinsum::SpinLock;
use std::sync::Arc;
use std::thread;

/// Element value that panics when widened, for failure injection.
pub const POISON: u32 = u32::MAX;

/// Element that makes the worker summing it panic when it holds [`POISON`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poisonable(pub u32);

impl Element for Poisonable {
    type Total = u64;

    fn widen(self) -> u64 {
        if self.0 == POISON {
            panic!("poisoned element");
        }
        self.0 as u64
    }
}

/// Array of `len` values cycling through `MIN_VALUE..=MAX_VALUE`.
pub fn cyclic(len: usize) -> Vec<i8> {
    (MIN_VALUE..=MAX_VALUE).cycle().take(len).collect()
}

/// Closed-form total of [`cyclic`]`(len)`.
pub fn cyclic_total(len: usize) -> i64 {
    let period = (MAX_VALUE as i64 - MIN_VALUE as i64 + 1) as usize;
    let full_cycles = (len / period) as i64;
    let tail = (len % period) as i64;
    let cycle_total: i64 = (MIN_VALUE as i64..=MAX_VALUE as i64).sum();
    full_cycles * cycle_total + tail * MIN_VALUE as i64 + tail * (tail - 1) / 2
}

/// Closed-form total of `0 + 1 + ... + (len - 1)`.
pub fn index_total(len: usize) -> u64 {
    let len = len as u64;
    len * len.saturating_sub(1) / 2
}

/// Has `num_threads` threads each increment a shared spinlock-protected
/// counter `increments` times and returns the final count.
pub fn hammer_spinlock(num_threads: usize, increments: u64) -> u64 {
    let counter = Arc::new(SpinLock::new(0u64));

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let counter = counter.clone();
            thread::spawn(move || {
                for _ in 0..increments {
                    let mut counter_guard = counter.lock();
                    *counter_guard += 1;
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("counter thread panicked");
    }

    let total = *counter.lock();
    total
}
