//! Token claims and the two token kinds.

use serde::{Deserialize, Serialize};

/// The purpose a token was minted for.
///
/// A token is only accepted by operations expecting its kind: an
/// authentication token cannot complete a password reset and a reset token
/// cannot authenticate a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenKind {
    Auth,
    Reset,
}

/// Claims carried inside a signed token.
///
/// `sub` is the account email, `user_id` the numeric account id. Instants
/// are unix-epoch seconds. Reset tokens additionally carry a `jti` so each
/// issuance is distinguishable even within the same second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account email
    pub sub: String,
    /// Numeric account id
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Token kind discriminator
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Issued at (unix timestamp, seconds)
    pub iat: i64,
    /// Expiry (unix timestamp, seconds)
    pub exp: i64,
    /// Unique token id, present on reset tokens only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}
