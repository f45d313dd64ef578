//! Lockout and reset-token records.
//!
//! [`LoginAttempt`] is the per-user failed-login state machine. Its two
//! states are "unlocked with a count" and "locked until an instant"; the
//! transitions live here so every store implementation persists the same
//! behavior. [`PasswordResetToken`] binds an issued reset token to a user
//! with an expiry instant and a single-use flag.

use chrono::{DateTime, Duration, Utc};

/// Per-user failed-attempt counter and lockout state.
///
/// Exactly one record exists per user; stores create it lazily with
/// get-or-create semantics. `locked_until` being present means the account
/// is locked; the field is never compared against the clock by readers,
/// only by [`LoginAttempt::should_unlock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAttempt {
    pub id: i64,
    pub user_id: i64,
    pub attempt_count: i32,
    pub last_attempt_at: DateTime<Utc>,
    pub locked_until: Option<DateTime<Utc>>,
}

impl LoginAttempt {
    /// A fresh record: zero attempts, not locked.
    pub fn new(id: i64, user_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            attempt_count: 0,
            last_attempt_at: now,
            locked_until: None,
        }
    }

    /// Count a failed attempt and engage the lockout once the threshold is
    /// reached.
    pub fn register_failure(
        &mut self,
        now: DateTime<Utc>,
        max_failed_attempts: i32,
        lockout: Duration,
    ) {
        self.attempt_count += 1;
        self.last_attempt_at = now;
        if self.attempt_count >= max_failed_attempts {
            self.locked_until = Some(now + lockout);
        }
    }

    /// True iff a lockout is recorded. Performs no time comparison: a stale
    /// lockout still counts as locked until explicitly unlocked.
    pub fn is_locked(&self) -> bool {
        self.locked_until.is_some()
    }

    /// True iff a lockout is recorded and `now` is strictly after it.
    ///
    /// A clock that moved backward relative to the stored instant never
    /// qualifies, so lockouts are monotonic with respect to stored time.
    pub fn should_unlock(&self, now: DateTime<Utc>) -> bool {
        matches!(self.locked_until, Some(until) if now > until)
    }

    /// Clear the lockout and the counter.
    pub fn unlock(&mut self) {
        self.reset_attempts();
        self.locked_until = None;
    }

    /// Reset the counter to zero. Leaves any lockout in place.
    pub fn reset_attempts(&mut self) {
        self.attempt_count = 0;
    }
}

/// A persisted record binding a reset token value to a user.
///
/// Usable iff not consumed and not expired; consumed exactly once at
/// successful password-change completion. Expired-or-used records are
/// deleted by the cleanup sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetToken {
    pub id: i64,
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
}

impl PasswordResetToken {
    pub fn new(
        id: i64,
        user_id: i64,
        token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            token: token.into(),
            user_id,
            expires_at,
            used: false,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        !self.used && !self.is_expired(now)
    }

    pub fn mark_used(&mut self) {
        self.used = true;
    }
}
