use std::env;

/// Signing key and token lifetimes for the token codec.
///
/// The secret is process-wide configuration loaded once at startup and
/// injected where needed; there is no ambient/static key.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Session (AUTH) token lifetime in seconds.
    pub auth_token_expiry: i64,
    /// Password-reset (RESET) token lifetime in seconds.
    pub reset_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            auth_token_expiry: env::var("JWT_AUTH_TOKEN_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
            reset_token_expiry: env::var("JWT_RESET_TOKEN_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(900), // 15 minutes
        }
    }
}
