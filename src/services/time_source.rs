//! Time Source
//!
//! Abstracts clock reads so the scroll-echo debounce and the default
//! selected day can be driven deterministically in tests.

use chrono::{Local, NaiveDate};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Abstraction over time-related operations
pub trait TimeSource: Send + Sync + std::fmt::Debug {
    /// Get the current instant for measuring elapsed time
    fn now(&self) -> Instant;

    /// Get today's calendar date
    fn today(&self) -> NaiveDate;

    /// Calculate elapsed time since an earlier instant
    fn elapsed_since(&self, earlier: Instant) -> Duration {
        self.now().saturating_duration_since(earlier)
    }
}

/// Type alias for shared time source
pub type SharedTimeSource = Arc<dyn TimeSource>;

/// Production implementation using the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl SystemTimeSource {
    /// Create a shared SystemTimeSource
    pub fn shared() -> SharedTimeSource {
        Arc::new(Self)
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Test implementation with a logical clock
///
/// `now()` only moves when `advance()` is called. `today()` is the base
/// date plus whole elapsed days.
#[derive(Debug)]
pub struct ManualTimeSource {
    logical_nanos: AtomicU64,
    base_instant: Instant,
    base_date: NaiveDate,
}

impl ManualTimeSource {
    /// Create a logical clock whose calendar starts at `base_date`
    pub fn new(base_date: NaiveDate) -> Self {
        Self {
            logical_nanos: AtomicU64::new(0),
            base_instant: Instant::now(),
            base_date,
        }
    }

    /// Create a shared ManualTimeSource
    pub fn shared(base_date: NaiveDate) -> Arc<Self> {
        Arc::new(Self::new(base_date))
    }

    /// Advance logical time by the given duration
    pub fn advance(&self, duration: Duration) {
        self.logical_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Get the logical elapsed time since creation
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.logical_nanos.load(Ordering::SeqCst))
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Instant {
        self.base_instant + self.elapsed()
    }

    fn today(&self) -> NaiveDate {
        let elapsed_days = self.elapsed().as_secs() / 86_400;
        self.base_date
            .checked_add_days(chrono::Days::new(elapsed_days))
            .unwrap_or(self.base_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_time_source_advance() {
        let base = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
        let ts = ManualTimeSource::new(base);
        let start = ts.now();

        ts.advance(Duration::from_millis(1500));
        assert_eq!(ts.elapsed_since(start), Duration::from_millis(1500));
        assert_eq!(ts.today(), base);

        ts.advance(Duration::from_secs(86_400));
        assert_eq!(ts.today(), base.succ_opt().expect("next day"));
    }

    #[test]
    fn test_shared_time_sources() {
        let real: SharedTimeSource = SystemTimeSource::shared();
        let manual: SharedTimeSource =
            ManualTimeSource::shared(NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"));
        let _ = real.now();
        assert_eq!(manual.today().to_string(), "2024-01-01");
    }
}
