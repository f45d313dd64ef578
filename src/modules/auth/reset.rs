//! The password-reset flow.
//!
//! A reset runs in two steps. `begin_reset` mints a short-lived RESET token
//! and records it; `complete_reset` validates the record, the token and the
//! new password, then swaps the hash and consumes the record. A token is
//! consumable exactly once.

use crate::store::{ResetTokenStore, UserStore};
use chrono::DateTime;
use flashdeck_auth::{PasswordHasher, PasswordPolicy, TokenCodec, TokenKind};
use flashdeck_core::{AuthError, Clock};
use flashdeck_models::Email;
use std::sync::Arc;
use tracing::info;

pub struct PasswordResetService {
    users: Arc<dyn UserStore>,
    tokens: Arc<dyn ResetTokenStore>,
    codec: Arc<TokenCodec>,
    hasher: Arc<dyn PasswordHasher>,
    policy: PasswordPolicy,
    clock: Arc<Clock>,
}

impl PasswordResetService {
    pub fn new(
        users: Arc<dyn UserStore>,
        tokens: Arc<dyn ResetTokenStore>,
        codec: Arc<TokenCodec>,
        hasher: Arc<dyn PasswordHasher>,
        policy: PasswordPolicy,
        clock: Arc<Clock>,
    ) -> Self {
        Self {
            users,
            tokens,
            codec,
            hasher,
            policy,
            clock,
        }
    }

    /// Mint a reset token for the account and record it.
    ///
    /// The stored expiry mirrors the token's own `exp` claim, so the record
    /// and the signature expire together.
    pub async fn begin_reset(&self, email: &str) -> Result<String, AuthError> {
        let email = Email::new(email)?;
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let token = self
            .codec
            .issue(TokenKind::Reset, user.email.as_str(), user.id)?;
        let claims = self.codec.verify(&token, TokenKind::Reset)?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| AuthError::Storage("token expiry out of range".to_string()))?;

        self.tokens
            .insert(user.id, token.clone(), expires_at)
            .await?;
        info!(user_id = user.id, "password reset token issued");
        Ok(token)
    }

    /// Validate a reset token and set the new password.
    ///
    /// Every check runs before any write: a rejected password leaves both
    /// the stored hash and the token record untouched, so the token stays
    /// usable for a retry.
    pub async fn complete_reset(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        let record = self
            .tokens
            .find_by_token(token)
            .await?
            .ok_or(AuthError::ResetTokenNotFound)?;
        if !record.is_usable(self.clock.now()) {
            return Err(AuthError::TokenExpiredOrUsed);
        }

        let claims = self.codec.verify(token, TokenKind::Reset)?;
        let email = Email::new(claims.sub)?;
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.policy.validate(new_password)?;
        let hash = self.hasher.hash(new_password)?;

        self.users.update_password(user.id, hash).await?;
        self.tokens.mark_used(token).await?;
        info!(user_id = user.id, "password reset completed");
        Ok(())
    }
}
