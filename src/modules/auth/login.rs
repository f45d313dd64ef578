//! The login flow.

use crate::modules::auth::LoginAttemptService;
use crate::store::UserStore;
use flashdeck_auth::{PasswordHasher, TokenCodec, TokenKind};
use flashdeck_core::AuthError;
use flashdeck_models::Email;
use std::sync::Arc;
use tracing::info;

/// Authenticates credentials and mints session tokens.
///
/// The flow checks the lockout before the password, so a locked account
/// reports [`AuthError::AccountLocked`] even when the submitted password is
/// correct.
pub struct LoginService {
    users: Arc<dyn UserStore>,
    attempts: Arc<LoginAttemptService>,
    hasher: Arc<dyn PasswordHasher>,
    codec: Arc<TokenCodec>,
}

impl LoginService {
    pub fn new(
        users: Arc<dyn UserStore>,
        attempts: Arc<LoginAttemptService>,
        hasher: Arc<dyn PasswordHasher>,
        codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            users,
            attempts,
            hasher,
            codec,
        }
    }

    /// Authenticate and return a signed session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let email = Email::new(email)?;
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // Lift an elapsed lockout before deciding whether the account is
        // locked.
        let attempt = self.attempts.unlock_if_eligible(user.id).await?;
        if attempt.is_locked() {
            return Err(AuthError::AccountLocked {
                minutes: self.attempts.lockout_minutes(),
            });
        }

        if !self.hasher.matches(password, &user.password_hash)? {
            self.attempts.on_failed_login(user.id).await?;
            return Err(AuthError::IncorrectPassword);
        }

        self.attempts.on_successful_login(user.id).await?;
        info!(user_id = user.id, "user logged in");
        self.codec.issue(TokenKind::Auth, user.email.as_str(), user.id)
    }
}
