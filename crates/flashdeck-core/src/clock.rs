//! An overridable clock.
//!
//! All time-dependent logic in the subsystem (lockout expiry, token expiry,
//! sweep cutoffs) reads "now" through a shared [`Clock`] so tests can pin
//! and advance time deterministically.

use chrono::{DateTime, Duration, Utc};
use std::sync::RwLock;

/// A time source that can be fixed for tests.
///
/// In production the clock simply delegates to [`Utc::now`]. Tests call
/// [`Clock::fix`] or [`Clock::advance`] to control what every component
/// observes as the current instant.
#[derive(Debug, Default)]
pub struct Clock {
    fixed: RwLock<Option<DateTime<Utc>>>,
}

impl Clock {
    /// A clock that follows the system time.
    pub fn system() -> Self {
        Self::default()
    }

    /// A clock pinned to `at` until further notice.
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Clock {
            fixed: RwLock::new(Some(at)),
        }
    }

    /// The current instant, honoring any fixed override.
    pub fn now(&self) -> DateTime<Utc> {
        match *self.fixed.read().expect("clock lock poisoned") {
            Some(fixed) => fixed,
            None => Utc::now(),
        }
    }

    /// Pin the clock to `at`. Subsequent `now` calls return `at` until the
    /// clock is fixed again or resumed.
    pub fn fix(&self, at: DateTime<Utc>) {
        *self.fixed.write().expect("clock lock poisoned") = Some(at);
    }

    /// Shift the fixed instant by `by`. Pins the clock first if it was
    /// following system time. Negative durations move the clock backward.
    pub fn advance(&self, by: Duration) {
        let mut fixed = self.fixed.write().expect("clock lock poisoned");
        let base = fixed.unwrap_or_else(Utc::now);
        *fixed = Some(base + by);
    }

    /// Drop any override and follow system time again.
    pub fn resume(&self) {
        *self.fixed.write().expect("clock lock poisoned") = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_tracks_real_time() {
        let clock = Clock::system();
        let before = Utc::now();
        let observed = clock.now();
        let after = Utc::now();
        assert!(before <= observed && observed <= after);
    }

    #[test]
    fn test_fixed_clock_is_stable() {
        let at = Utc::now();
        let clock = Clock::fixed(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), at);
    }

    #[test]
    fn test_advance_moves_fixed_instant() {
        let at = Utc::now();
        let clock = Clock::fixed(at);
        clock.advance(Duration::minutes(16));
        assert_eq!(clock.now(), at + Duration::minutes(16));
    }

    #[test]
    fn test_advance_backward() {
        let at = Utc::now();
        let clock = Clock::fixed(at);
        clock.advance(Duration::minutes(-5));
        assert_eq!(clock.now(), at - Duration::minutes(5));
    }

    #[test]
    fn test_resume_follows_system_time() {
        let clock = Clock::fixed(Utc::now() - Duration::days(1));
        clock.resume();
        assert!(clock.now() > Utc::now() - Duration::minutes(1));
    }
}
