use jiff::{SignedDuration, Timestamp};
use parking_lot::Mutex;
use std::sync::Arc;

/// Source of the current time for creation stamps, click stamps and expiry
/// checks.
///
/// Returned timestamps have millisecond precision, matching the persisted
/// format, so an entry built in memory equals the one read back from storage.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current time of the clock.
    fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Truncates a timestamp to whole milliseconds.
pub fn truncate_to_millis(ts: Timestamp) -> Timestamp {
    Timestamp::from_millisecond(ts.as_millisecond()).unwrap_or(ts)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        truncate_to_millis(Timestamp::now())
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can hold one handle and
/// advance the time observed by the services holding the others.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Timestamp>>,
}

impl ManualClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Arc::new(Mutex::new(truncate_to_millis(now))),
        }
    }

    /// Sets the clock to `now`.
    pub fn set(&self, now: Timestamp) {
        *self.now.lock() = truncate_to_millis(now);
    }

    /// Moves the clock forward by `duration`. Saturates at the maximum
    /// representable timestamp.
    pub fn advance(&self, duration: SignedDuration) {
        let mut now = self.now.lock();
        *now = now.checked_add(duration).unwrap_or(Timestamp::MAX);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_has_millisecond_precision() {
        let now = SystemClock.now();
        assert_eq!(now.subsec_nanosecond() % 1_000_000, 0);
    }

    #[test]
    fn manual_clock_works() {
        let base = Timestamp::from_second(0).unwrap();
        let clock = ManualClock::new(base);
        assert_eq!(clock.now(), base);

        clock.advance(SignedDuration::from_secs(90));
        assert_eq!(clock.now(), Timestamp::from_second(90).unwrap());

        let target = Timestamp::from_second(1000).unwrap();
        clock.set(target);
        assert_eq!(clock.now(), target);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(Timestamp::from_second(0).unwrap());
        let handle = clock.clone();

        handle.advance(SignedDuration::from_mins(5));
        assert_eq!(clock.now(), Timestamp::from_second(300).unwrap());
    }
}
