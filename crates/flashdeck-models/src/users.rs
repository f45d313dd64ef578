//! The user credential: a normalized email paired with a one-way hash.

use crate::value_types::Email;
use std::fmt;

/// A registered account.
///
/// The password hash is produced by an injected hasher and is replaced
/// wholesale on password reset; the plaintext secret is never stored, and
/// the `Debug` impl keeps the hash out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: Email,
    pub password_hash: String,
}

impl User {
    /// A persisted user, as loaded or returned by a store.
    pub fn new(id: i64, email: Email, password_hash: impl Into<String>) -> Self {
        Self {
            id,
            email,
            password_hash: password_hash.into(),
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}
