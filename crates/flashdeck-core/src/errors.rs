//! Error types for the credential and token lifecycle.
//!
//! Every fallible operation in the subsystem returns one of the variants
//! below. The set is closed on purpose: callers pattern-match on the outcome
//! instead of catching ad-hoc failures, and nothing is silently downgraded.

use thiserror::Error;

/// The failure taxonomy of the auth subsystem.
///
/// All variants are terminal from the subsystem's perspective; retry policy,
/// if any, belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No account exists for the presented email.
    #[error("no account with this email")]
    UserNotFound,

    /// The password did not match the stored hash. Always paired with an
    /// attempt-counter increment.
    #[error("incorrect password")]
    IncorrectPassword,

    /// A lockout is currently in effect. Carries the configured lockout
    /// duration for user messaging.
    #[error("account is locked out for {minutes} minutes")]
    AccountLocked { minutes: i64 },

    /// A token was required but was empty or blank.
    #[error("token cannot be empty or blank")]
    TokenMissing,

    /// The token is malformed, its signature does not verify, or its kind
    /// claim does not match the expected kind.
    #[error("invalid token")]
    TokenInvalid,

    /// The token's embedded expiry is in the past.
    #[error("token has expired")]
    TokenExpired,

    /// No persisted record exists for the presented reset token value.
    #[error("reset token not found")]
    ResetTokenNotFound,

    /// A reset-token record exists but has expired or was already consumed.
    #[error("token is either expired or already used")]
    TokenExpiredOrUsed,

    /// A new password failed the password policy. The message names the
    /// rule that failed.
    #[error("{0}")]
    PasswordPolicyViolation(String),

    /// The presented email does not parse as `local@domain`.
    #[error("{0}")]
    EmailInvalid(String),

    /// Registration collided with an existing account.
    #[error("email already exists")]
    EmailTaken,

    /// An infrastructure failure from a store or the hashing backend.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Storage(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AuthError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthError::AccountLocked { minutes: 15 };
        assert_eq!(err.to_string(), "account is locked out for 15 minutes");

        let err = AuthError::PasswordPolicyViolation(
            "password must contain an uppercase letter".to_string(),
        );
        assert_eq!(
            err.to_string(),
            "password must contain an uppercase letter"
        );

        let err = AuthError::TokenExpiredOrUsed;
        assert_eq!(err.to_string(), "token is either expired or already used");
    }

    #[test]
    fn test_sqlx_error_conversion() {
        let err: AuthError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AuthError::Storage(_)));
    }

    #[test]
    fn test_variants_are_comparable() {
        assert_eq!(AuthError::UserNotFound, AuthError::UserNotFound);
        assert_ne!(AuthError::TokenInvalid, AuthError::TokenExpired);
    }
}
