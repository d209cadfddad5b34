//! Creation-time-derived identifiers that never collide.
//!
//! Ids are decimal epoch milliseconds, bumped past the previously issued
//! value when two ids are requested within the same millisecond (a user
//! message and its reply, or rapid sequential sends).

use std::sync::atomic::{AtomicI64, Ordering};

use crate::clock::Clock;

/// Monotonic id generator shared by sessions and messages.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// Issue the next id given the current time in epoch milliseconds.
    ///
    /// The result is `max(now_ms, last + 1)`, so ids strictly increase
    /// even if the wall clock stalls or steps backwards.
    pub fn next_at(&self, now_ms: i64) -> String {
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_ms.max(current + 1);
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate.to_string(),
                Err(actual) => current = actual,
            }
        }
    }

    /// Issue the next id using the given clock.
    pub fn next(&self, clock: &dyn Clock) -> String {
        self.next_at(clock.now().timestamp_millis())
    }

    /// The most recently issued id value (0 if none yet).
    pub fn last_issued(&self) -> i64 {
        self.last.load(Ordering::Acquire)
    }
}
