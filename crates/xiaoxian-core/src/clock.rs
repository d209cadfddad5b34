//! Wall-clock access behind a trait so time-dependent behaviour can be
//! pinned in tests.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Local, Utc};

/// Source of the current local time.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Local>;

    /// Current time in epoch milliseconds.
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }

    /// Current time rendered with a `chrono` format string.
    fn format_now(&self, fmt: &str) -> String {
        self.now().format(fmt).to_string()
    }
}

/// The real system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Local>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Local>) -> Self {
        Self { instant }
    }

    /// Freeze the clock at the given epoch milliseconds.
    ///
    /// Out-of-range values fall back to the Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        let instant = DateTime::<Utc>::from_timestamp_millis(millis)
            .unwrap_or_default()
            .with_timezone(&Local);
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.instant
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn from_millis(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    pub fn set_millis(&self, millis: i64) {
        self.millis.store(millis, Ordering::Release);
    }

    pub fn advance_millis(&self, delta: i64) {
        self.millis.fetch_add(delta, Ordering::AcqRel);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        FixedClock::from_millis(self.millis.load(Ordering::Acquire)).now()
    }
}
