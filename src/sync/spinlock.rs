// SPDX-License-Identifier: MIT

use std::cell::UnsafeCell;
use std::hint;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

/// Busy-waiting mutual exclusion lock owning the value it protects.
///
/// Acquisition is a test-and-test-and-set loop: a contender spins on a plain
/// load until the flag looks free, then races with a single
/// `compare_exchange_weak`. Exactly one contender wins each round; the others
/// go back to spinning. The waiting thread is never parked, so the lock is
/// only suitable for short critical sections.
///
/// There is no fairness: a thread may lose every round under contention.
pub struct SpinLock<T> {
    /// `true` while a guard is alive.
    locked: AtomicBool,
    /// Number of threads currently inside the critical section. Anything but
    /// 0 or 1 means the flag failed to exclude.
    holders: AtomicUsize,
    /// Successful acquisitions.
    acquisitions: AtomicU64,
    /// Acquisitions that found the lock held at least once.
    contended: AtomicU64,
    value: UnsafeCell<T>,
}

// SAFETY: access to `value` is serialized by `locked`, so sharing the lock
// only requires the value to be sendable between threads.
unsafe impl<T: Send> Send for SpinLock<T> {}
unsafe impl<T: Send> Sync for SpinLock<T> {}

/// Snapshot of a lock's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockStats {
    pub acquisitions: u64,
    pub contended: u64,
}

/// RAII guard; the lock is released when the guard is dropped.
///
/// Not `Send`: the guard is released by the thread that acquired it.
pub struct SpinLockGuard<'a, T> {
    lock: &'a SpinLock<T>,
    _not_send: PhantomData<*const ()>,
}

// SAFETY: a shared guard only hands out `&T`, which is sound to share across
// threads exactly when `T: Sync`.
unsafe impl<T: Sync> Sync for SpinLockGuard<'_, T> {}

impl<T> SpinLock<T> {
    pub const fn new(value: T) -> Self {
        SpinLock {
            locked: AtomicBool::new(false),
            holders: AtomicUsize::new(0),
            acquisitions: AtomicU64::new(0),
            contended: AtomicU64::new(0),
            value: UnsafeCell::new(value),
        }
    }

    /// Spins until the lock is acquired.
    pub fn lock(&self) -> SpinLockGuard<'_, T> {
        let mut spun = false;
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            spun = true;
            while self.locked.load(Ordering::Relaxed) {
                hint::spin_loop();
            }
        }
        if spun {
            self.contended.fetch_add(1, Ordering::Relaxed);
        }
        self.enter()
    }

    /// Makes a single acquisition attempt without spinning.
    pub fn try_lock(&self) -> Option<SpinLockGuard<'_, T>> {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| self.enter())
    }

    /// Returns `true` if some thread currently holds the lock.
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }

    pub fn stats(&self) -> LockStats {
        LockStats {
            acquisitions: self.acquisitions.load(Ordering::Relaxed),
            contended: self.contended.load(Ordering::Relaxed),
        }
    }

    /// Consumes the lock and returns the protected value.
    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }

    fn enter(&self) -> SpinLockGuard<'_, T> {
        let prior = self.holders.fetch_add(1, Ordering::Relaxed);
        if prior != 0 {
            lock_invariant_violated(prior + 1);
        }
        self.acquisitions.fetch_add(1, Ordering::Relaxed);
        SpinLockGuard {
            lock: self,
            _not_send: PhantomData,
        }
    }
}

impl<T: Default> Default for SpinLock<T> {
    fn default() -> Self {
        SpinLock::new(T::default())
    }
}

impl<T> SpinLockGuard<'_, T> {
    /// Releases the lock. Equivalent to dropping the guard.
    pub fn unlock(self) {
        drop(self);
    }
}

impl<T> Deref for SpinLockGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: the guard exists only while `locked` is held by this thread.
        unsafe { &*self.lock.value.get() }
    }
}

impl<T> DerefMut for SpinLockGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: as above; the guard is the unique accessor.
        unsafe { &mut *self.lock.value.get() }
    }
}

impl<T> Drop for SpinLockGuard<'_, T> {
    fn drop(&mut self) {
        self.lock.holders.fetch_sub(1, Ordering::Relaxed);
        self.lock.locked.store(false, Ordering::Release);
    }
}

/// Two holders inside one critical section cannot be recovered from: the
/// protected value may already be torn.
#[cold]
fn lock_invariant_violated(holders: usize) -> ! {
    tracing::error!(holders, "spinlock held by more than one thread, aborting");
    std::process::abort();
}
