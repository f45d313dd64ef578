//! In-memory store used by the integration tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flashdeck_config::LockoutConfig;
use flashdeck_core::AuthError;
use flashdeck_models::{Email, LoginAttempt, PasswordResetToken, User};
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{LoginAttemptStore, ResetTokenStore, UserStore};

#[derive(Default)]
struct Tables {
    users: HashMap<i64, User>,
    user_ids_by_email: HashMap<String, i64>,
    attempts: HashMap<i64, LoginAttempt>,
    tokens: HashMap<String, PasswordResetToken>,
    next_user_id: i64,
    next_attempt_id: i64,
    next_token_id: i64,
}

/// All three stores over shared in-process tables.
///
/// A single `RwLock` guards the tables, so every trait method is atomic
/// with respect to the others. Not persistent; for tests and examples.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
        let tables = self.tables.read().await;
        Ok(tables
            .user_ids_by_email
            .get(email.as_str())
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn insert(&self, email: Email, password_hash: String) -> Result<User, AuthError> {
        let mut tables = self.tables.write().await;
        if tables.user_ids_by_email.contains_key(email.as_str()) {
            return Err(AuthError::EmailTaken);
        }
        tables.next_user_id += 1;
        let user = User::new(tables.next_user_id, email, password_hash);
        tables
            .user_ids_by_email
            .insert(user.email.as_str().to_string(), user.id);
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_password(
        &self,
        user_id: i64,
        password_hash: String,
    ) -> Result<(), AuthError> {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(&user_id) {
            Some(user) => {
                user.password_hash = password_hash;
                Ok(())
            }
            None => Err(AuthError::UserNotFound),
        }
    }
}

#[async_trait]
impl LoginAttemptStore for MemoryStore {
    async fn get_or_create(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<LoginAttempt, AuthError> {
        let mut tables = self.tables.write().await;
        if let Some(attempt) = tables.attempts.get(&user_id) {
            return Ok(attempt.clone());
        }
        tables.next_attempt_id += 1;
        let attempt = LoginAttempt::new(tables.next_attempt_id, user_id, now);
        tables.attempts.insert(user_id, attempt.clone());
        Ok(attempt)
    }

    async fn record_failure(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
        lockout: &LockoutConfig,
    ) -> Result<LoginAttempt, AuthError> {
        let mut guard = self.tables.write().await;
        let tables = &mut *guard;
        let next_id = tables.next_attempt_id + 1;
        let attempt = tables
            .attempts
            .entry(user_id)
            .or_insert_with(|| LoginAttempt::new(next_id, user_id, now));
        if attempt.id == next_id {
            tables.next_attempt_id = next_id;
        }
        attempt.register_failure(now, lockout.max_failed_attempts, lockout.lockout_duration());
        Ok(attempt.clone())
    }

    async fn clear_attempts(&self, user_id: i64) -> Result<(), AuthError> {
        let mut tables = self.tables.write().await;
        if let Some(attempt) = tables.attempts.get_mut(&user_id) {
            attempt.reset_attempts();
        }
        Ok(())
    }

    async fn unlock(&self, user_id: i64) -> Result<(), AuthError> {
        let mut tables = self.tables.write().await;
        if let Some(attempt) = tables.attempts.get_mut(&user_id) {
            attempt.unlock();
        }
        Ok(())
    }
}

#[async_trait]
impl ResetTokenStore for MemoryStore {
    async fn insert(
        &self,
        user_id: i64,
        token: String,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordResetToken, AuthError> {
        let mut tables = self.tables.write().await;
        tables.next_token_id += 1;
        let record = PasswordResetToken::new(tables.next_token_id, user_id, token, expires_at);
        tables.tokens.insert(record.token.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<PasswordResetToken>, AuthError> {
        let tables = self.tables.read().await;
        Ok(tables.tokens.get(token).cloned())
    }

    async fn mark_used(&self, token: &str) -> Result<PasswordResetToken, AuthError> {
        let mut tables = self.tables.write().await;
        match tables.tokens.get_mut(token) {
            Some(record) if record.used => Err(AuthError::TokenExpiredOrUsed),
            Some(record) => {
                record.mark_used();
                Ok(record.clone())
            }
            None => Err(AuthError::ResetTokenNotFound),
        }
    }

    async fn delete_expired_or_used(&self, now: DateTime<Utc>) -> Result<u64, AuthError> {
        let mut tables = self.tables.write().await;
        let before = tables.tokens.len();
        tables
            .tokens
            .retain(|_, record| !record.used && record.expires_at > now);
        Ok((before - tables.tokens.len()) as u64)
    }
}
