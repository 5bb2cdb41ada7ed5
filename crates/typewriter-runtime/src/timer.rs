#![forbid(unsafe_code)]

//! Cancellable waits for driver threads.
//!
//! A driver sleeps until its next transition is due by waiting on a
//! [`StopSignal`]. Tearing the instance down trips the paired
//! [`StopTrigger`], which wakes the wait immediately instead of letting the
//! thread sleep out the remaining delay.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

type Flag = Arc<(Mutex<bool>, Condvar)>;

fn lock_flag(lock: &Mutex<bool>) -> MutexGuard<'_, bool> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Waiting side of a stop pair.
#[derive(Clone)]
pub struct StopSignal {
    inner: Flag,
}

impl StopSignal {
    /// Create a new (signal, trigger) pair.
    pub(crate) fn new() -> (Self, StopTrigger) {
        let inner: Flag = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: inner.clone(),
        };
        (signal, StopTrigger { inner })
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock_flag(lock)
    }

    /// Block until stopped or `duration` elapses.
    ///
    /// Returns `true` if stopped, `false` on timeout. Spurious wakeups are
    /// absorbed by re-waiting for the time still left.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock_flag(lock);
        if *stopped {
            return true;
        }
        if duration.is_zero() {
            return false;
        }

        let start = Instant::now();
        let mut remaining = duration;
        loop {
            let (guard, result) = cvar
                .wait_timeout(stopped, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            stopped = guard;
            if *stopped {
                return true;
            }
            if result.timed_out() {
                return false;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            remaining = duration - elapsed;
        }
    }
}

/// Owner side of a stop pair.
pub(crate) struct StopTrigger {
    inner: Flag,
}

impl StopTrigger {
    pub(crate) fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        *lock_flag(lock) = true;
        cvar.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn starts_unstopped() {
        let (signal, _trigger) = StopSignal::new();
        assert!(!signal.is_stopped());
    }

    #[test]
    fn trigger_sets_flag() {
        let (signal, trigger) = StopSignal::new();
        trigger.stop();
        assert!(signal.is_stopped());
        assert!(signal.wait_timeout(Duration::from_secs(5)));
    }

    #[test]
    fn wait_times_out() {
        let (signal, _trigger) = StopSignal::new();
        let start = Instant::now();
        assert!(!signal.wait_timeout(Duration::from_millis(10)));
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn zero_wait_returns_immediately() {
        let (signal, _trigger) = StopSignal::new();
        assert!(!signal.wait_timeout(Duration::ZERO));
    }

    #[test]
    fn wait_is_interrupted_by_trigger() {
        let (signal, trigger) = StopSignal::new();
        let waiter = signal.clone();
        let handle = thread::spawn(move || waiter.wait_timeout(Duration::from_secs(10)));
        thread::sleep(Duration::from_millis(20));
        let start = Instant::now();
        trigger.stop();
        assert!(handle.join().unwrap());
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
