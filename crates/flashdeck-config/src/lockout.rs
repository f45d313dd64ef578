use chrono::Duration;
use std::env;

/// Failed-login lockout policy.
///
/// After `max_failed_attempts` consecutive failures an account is locked for
/// `lockout_minutes`. The lockout is cleared only by an eligible unlock, not
/// by the passage of time alone.
#[derive(Clone, Copy, Debug)]
pub struct LockoutConfig {
    pub max_failed_attempts: i32,
    pub lockout_minutes: i64,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            lockout_minutes: 15,
        }
    }
}

impl LockoutConfig {
    pub fn from_env() -> Self {
        Self {
            max_failed_attempts: env::var("LOCKOUT_MAX_FAILED_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            lockout_minutes: env::var("LOCKOUT_DURATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
        }
    }

    /// The lockout window as a chrono duration.
    pub fn lockout_duration(&self) -> Duration {
        Duration::minutes(self.lockout_minutes)
    }
}
