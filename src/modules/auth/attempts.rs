//! Failed-attempt tracking around the [`LoginAttemptStore`].

use crate::store::LoginAttemptStore;
use flashdeck_config::LockoutConfig;
use flashdeck_core::{AuthError, Clock};
use flashdeck_models::LoginAttempt;
use std::sync::Arc;
use tracing::{info, warn};

/// Applies the lockout policy to a user's attempt record.
pub struct LoginAttemptService {
    attempts: Arc<dyn LoginAttemptStore>,
    clock: Arc<Clock>,
    config: LockoutConfig,
}

impl LoginAttemptService {
    pub fn new(
        attempts: Arc<dyn LoginAttemptStore>,
        clock: Arc<Clock>,
        config: LockoutConfig,
    ) -> Self {
        Self {
            attempts,
            clock,
            config,
        }
    }

    /// Count a failed attempt, engaging the lockout at the threshold.
    pub async fn on_failed_login(&self, user_id: i64) -> Result<LoginAttempt, AuthError> {
        let attempt = self
            .attempts
            .record_failure(user_id, self.clock.now(), &self.config)
            .await?;

        if attempt.is_locked() {
            warn!(
                user_id,
                attempt_count = attempt.attempt_count,
                "account locked after repeated failed logins"
            );
        }
        Ok(attempt)
    }

    /// Reset the counter after a successful login.
    pub async fn on_successful_login(&self, user_id: i64) -> Result<(), AuthError> {
        self.attempts.clear_attempts(user_id).await
    }

    /// Lift an elapsed lockout, then return the user's current record.
    ///
    /// A lockout is lifted only when the clock has moved strictly past its
    /// expiry. A still-running or future-dated lockout stays in place.
    pub async fn unlock_if_eligible(&self, user_id: i64) -> Result<LoginAttempt, AuthError> {
        let now = self.clock.now();
        let attempt = self.attempts.get_or_create(user_id, now).await?;

        if attempt.should_unlock(now) {
            self.attempts.unlock(user_id).await?;
            info!(user_id, "lockout expired, account unlocked");
            return self.attempts.get_or_create(user_id, now).await;
        }
        Ok(attempt)
    }

    /// Current failed-attempt count for a user.
    pub async fn get_attempt_count(&self, user_id: i64) -> Result<i32, AuthError> {
        let attempt = self.attempts.get_or_create(user_id, self.clock.now()).await?;
        Ok(attempt.attempt_count)
    }

    /// Whether a lockout is currently recorded for a user. Reads the stored
    /// state only; an elapsed lockout still reports locked until lifted.
    pub async fn is_locked(&self, user_id: i64) -> Result<bool, AuthError> {
        let attempt = self.attempts.get_or_create(user_id, self.clock.now()).await?;
        Ok(attempt.is_locked())
    }

    /// The configured lockout window, for user messaging.
    pub fn lockout_minutes(&self) -> i64 {
        self.config.lockout_minutes
    }
}
