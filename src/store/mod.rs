//! Persistence traits for the credential subsystem.
//!
//! Services depend on these traits only. [`memory::MemoryStore`] backs the
//! integration tests; [`postgres::PgStore`] is the production backend.
//!
//! Each trait method is the atomic unit of its operation: implementations
//! perform the read-modify-write under a single lock or a single SQL
//! statement so concurrent callers observe consistent state.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flashdeck_config::LockoutConfig;
use flashdeck_core::AuthError;
use flashdeck_models::{Email, LoginAttempt, PasswordResetToken, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Account storage.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up an account by normalized email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;

    /// Create an account, assigning its id.
    ///
    /// Returns [`AuthError::EmailTaken`] when the email is already
    /// registered.
    async fn insert(&self, email: Email, password_hash: String) -> Result<User, AuthError>;

    /// Replace a user's password hash.
    async fn update_password(&self, user_id: i64, password_hash: String)
    -> Result<(), AuthError>;
}

/// Per-user failed-attempt records.
#[async_trait]
pub trait LoginAttemptStore: Send + Sync {
    /// Fetch the user's attempt record, creating a fresh one if absent.
    ///
    /// Concurrent calls for the same user yield the same record.
    async fn get_or_create(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<LoginAttempt, AuthError>;

    /// Atomically count a failed attempt, engaging the lockout at the
    /// configured threshold. Returns the record after the update.
    async fn record_failure(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
        lockout: &LockoutConfig,
    ) -> Result<LoginAttempt, AuthError>;

    /// Reset the attempt counter to zero, leaving any lockout in place.
    async fn clear_attempts(&self, user_id: i64) -> Result<(), AuthError>;

    /// Clear both the lockout and the counter.
    async fn unlock(&self, user_id: i64) -> Result<(), AuthError>;
}

/// Issued password-reset records.
#[async_trait]
pub trait ResetTokenStore: Send + Sync {
    /// Record a newly issued reset token.
    async fn insert(
        &self,
        user_id: i64,
        token: String,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordResetToken, AuthError>;

    /// Look up a record by its exact token value.
    async fn find_by_token(&self, token: &str)
    -> Result<Option<PasswordResetToken>, AuthError>;

    /// Consume a token exactly once.
    ///
    /// Returns the updated record, [`AuthError::TokenExpiredOrUsed`] when
    /// another caller consumed it first, or
    /// [`AuthError::ResetTokenNotFound`] when no such record exists.
    async fn mark_used(&self, token: &str) -> Result<PasswordResetToken, AuthError>;

    /// Delete every record that is expired at `now` or already used.
    /// Returns the number of rows removed.
    async fn delete_expired_or_used(&self, now: DateTime<Utc>) -> Result<u64, AuthError>;
}
