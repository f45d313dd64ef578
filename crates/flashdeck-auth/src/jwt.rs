//! Signed-token issuance and verification.
//!
//! The codec signs with HMAC-SHA256 using a key injected through
//! [`JwtConfig`]. Expiry is evaluated against the injected [`Clock`] rather
//! than the library's wall-clock check, so token lifetimes are testable
//! without sleeping.

use crate::claims::{Claims, TokenKind};
use flashdeck_config::JwtConfig;
use flashdeck_core::{AuthError, Clock};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::sync::Arc;
use uuid::Uuid;

/// Issues and verifies signed tokens for the two token kinds.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    auth_token_expiry: i64,
    reset_token_expiry: i64,
    clock: Arc<Clock>,
}

impl TokenCodec {
    pub fn new(config: &JwtConfig, clock: Arc<Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            auth_token_expiry: config.auth_token_expiry,
            reset_token_expiry: config.reset_token_expiry,
            clock,
        }
    }

    /// Mint a token of the given kind for a user.
    ///
    /// Lifetime depends on the kind. Reset tokens carry a fresh `jti` so two
    /// tokens minted within the same second are still distinct values.
    pub fn issue(&self, kind: TokenKind, subject: &str, user_id: i64) -> Result<String, AuthError> {
        let iat = self.clock.now().timestamp();
        let exp = iat + self.expiry_for(kind);
        let jti = match kind {
            TokenKind::Auth => None,
            TokenKind::Reset => Some(Uuid::new_v4().to_string()),
        };

        let claims = Claims {
            sub: subject.to_string(),
            user_id,
            kind,
            iat,
            exp,
            jti,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Storage(format!("failed to sign token: {}", e)))
    }

    /// Verify a token's signature, expiry and kind, returning its claims.
    ///
    /// Checks run in a fixed order so callers get the most specific error:
    /// missing input, then signature and structure, then expiry against the
    /// injected clock, then the kind discriminator.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::TokenMissing);
        }

        // Expiry is checked below against the injected clock, not here.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            }
        })?;

        if data.claims.exp < self.clock.now().timestamp() {
            return Err(AuthError::TokenExpired);
        }

        if data.claims.kind != expected {
            return Err(AuthError::TokenInvalid);
        }

        Ok(data.claims)
    }

    fn expiry_for(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Auth => self.auth_token_expiry,
            TokenKind::Reset => self.reset_token_expiry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            auth_token_expiry: 3600,
            reset_token_expiry: 900,
        }
    }

    fn test_codec() -> (TokenCodec, Arc<Clock>) {
        let clock = Arc::new(Clock::fixed(chrono::Utc::now()));
        let codec = TokenCodec::new(&test_config(), clock.clone());
        (codec, clock)
    }

    #[test]
    fn test_issue_and_verify_auth_token() {
        let (codec, clock) = test_codec();
        let token = codec.issue(TokenKind::Auth, "user@example.com", 42).unwrap();
        let claims = codec.verify(&token, TokenKind::Auth).unwrap();

        assert_eq!(claims.sub, "user@example.com");
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.kind, TokenKind::Auth);
        assert_eq!(claims.exp, clock.now().timestamp() + 3600);
        assert!(claims.jti.is_none());
    }

    #[test]
    fn test_reset_token_carries_unique_jti() {
        let (codec, _clock) = test_codec();
        let a = codec.issue(TokenKind::Reset, "user@example.com", 1).unwrap();
        let b = codec.issue(TokenKind::Reset, "user@example.com", 1).unwrap();
        assert_ne!(a, b);

        let claims_a = codec.verify(&a, TokenKind::Reset).unwrap();
        let claims_b = codec.verify(&b, TokenKind::Reset).unwrap();
        assert!(claims_a.jti.is_some());
        assert_ne!(claims_a.jti, claims_b.jti);
        assert_eq!(claims_a.exp, claims_a.iat + 900);
    }

    #[test]
    fn test_blank_token_is_missing() {
        let (codec, _clock) = test_codec();
        assert_eq!(
            codec.verify("", TokenKind::Auth),
            Err(AuthError::TokenMissing)
        );
        assert_eq!(
            codec.verify("   ", TokenKind::Auth),
            Err(AuthError::TokenMissing)
        );
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let (codec, _clock) = test_codec();
        assert_eq!(
            codec.verify("not.a.token", TokenKind::Auth),
            Err(AuthError::TokenInvalid)
        );
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let (codec, clock) = test_codec();
        let token = codec.issue(TokenKind::Auth, "user@example.com", 1).unwrap();

        let other = TokenCodec::new(
            &JwtConfig {
                secret: "a-different-secret".to_string(),
                ..test_config()
            },
            clock,
        );
        assert_eq!(
            other.verify(&token, TokenKind::Auth),
            Err(AuthError::TokenInvalid)
        );
    }

    #[test]
    fn test_kind_mismatch_is_invalid() {
        let (codec, _clock) = test_codec();
        let auth = codec.issue(TokenKind::Auth, "user@example.com", 1).unwrap();
        let reset = codec.issue(TokenKind::Reset, "user@example.com", 1).unwrap();

        assert_eq!(
            codec.verify(&auth, TokenKind::Reset),
            Err(AuthError::TokenInvalid)
        );
        assert_eq!(
            codec.verify(&reset, TokenKind::Auth),
            Err(AuthError::TokenInvalid)
        );
    }

    #[test]
    fn test_token_expires_against_injected_clock() {
        let (codec, clock) = test_codec();
        let token = codec.issue(TokenKind::Auth, "user@example.com", 1).unwrap();

        // Valid right up to and including the expiry instant.
        clock.advance(Duration::seconds(3600));
        assert!(codec.verify(&token, TokenKind::Auth).is_ok());

        clock.advance(Duration::seconds(1));
        assert_eq!(
            codec.verify(&token, TokenKind::Auth),
            Err(AuthError::TokenExpired)
        );
    }

    #[test]
    fn test_expired_reported_before_kind_mismatch() {
        let (codec, clock) = test_codec();
        let token = codec.issue(TokenKind::Reset, "user@example.com", 1).unwrap();

        clock.advance(Duration::seconds(901));
        assert_eq!(
            codec.verify(&token, TokenKind::Auth),
            Err(AuthError::TokenExpired)
        );
    }
}
