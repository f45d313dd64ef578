use crate::store::UserStore;
use flashdeck_auth::{PasswordHasher, PasswordPolicy};
use flashdeck_core::AuthError;
use flashdeck_models::{Email, User};
use std::sync::Arc;
use tracing::info;

/// Creates accounts with validated emails and policy-checked passwords.
pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    policy: PasswordPolicy,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        policy: PasswordPolicy,
    ) -> Self {
        Self {
            users,
            hasher,
            policy,
        }
    }

    /// Register a new account. The email is normalized, the password is
    /// policy-checked and only its hash is stored.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::new(email)?;
        self.policy.validate(password)?;
        let hash = self.hasher.hash(password)?;

        let user = self.users.insert(email, hash).await?;
        info!(user_id = user.id, "user registered");
        Ok(user)
    }
}
