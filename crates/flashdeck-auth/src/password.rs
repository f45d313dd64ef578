//! Password hashing and strength rules.

use flashdeck_core::AuthError;

/// Hashing seam so services never depend on a concrete algorithm.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage.
    fn hash(&self, plain: &str) -> Result<String, AuthError>;

    /// Check a plaintext password against a stored hash.
    fn matches(&self, plain: &str, hash: &str) -> Result<bool, AuthError>;
}

/// The production hasher, backed by bcrypt.
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// A hasher with an explicit cost. Tests use a low cost to keep
    /// hashing fast.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, plain: &str) -> Result<String, AuthError> {
        Ok(bcrypt::hash(plain, self.cost)?)
    }

    fn matches(&self, plain: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(bcrypt::verify(plain, hash)?)
    }
}

/// Minimum-strength rules applied to every new password.
///
/// A password must be at least `min_length` characters and contain an
/// uppercase letter, a lowercase letter and a digit. Violations report the
/// first rule that failed.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl PasswordPolicy {
    pub fn validate(&self, password: &str) -> Result<(), AuthError> {
        if password.trim().is_empty() {
            return Err(AuthError::PasswordPolicyViolation(
                "password cannot be blank".to_string(),
            ));
        }
        if password.chars().count() < self.min_length {
            return Err(AuthError::PasswordPolicyViolation(format!(
                "password must be at least {} characters long",
                self.min_length
            )));
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(AuthError::PasswordPolicyViolation(
                "password must contain an uppercase letter".to_string(),
            ));
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(AuthError::PasswordPolicyViolation(
                "password must contain a lowercase letter".to_string(),
            ));
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AuthError::PasswordPolicyViolation(
                "password must contain a number".to_string(),
            ));
        }
        Ok(())
    }
}
