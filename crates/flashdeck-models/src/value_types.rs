//! Strongly-typed value objects for domain primitives.
//!
//! # Example
//!
//! ```ignore
//! use flashdeck_models::Email;
//!
//! let email: Email = "User@Example.com".parse().unwrap();
//! assert_eq!(email.as_str(), "user@example.com");
//! ```

use flashdeck_core::AuthError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+$").expect("email pattern is valid")
});

/// A validated email address, normalized to lowercase.
///
/// This type guarantees that the contained string matched the
/// `local@domain` pattern at construction and that lookups by email are
/// case-insensitive because every `Email` is stored lowercased.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Email(String);

impl Email {
    /// Parse and normalize an email address.
    ///
    /// Returns [`AuthError::EmailInvalid`] if the input does not match the
    /// `local@domain` pattern.
    pub fn new(raw: impl Into<String>) -> Result<Self, AuthError> {
        let raw = raw.into();
        if !EMAIL_PATTERN.is_match(&raw) {
            return Err(AuthError::EmailInvalid(format!(
                "'{}' is not a valid email address",
                raw
            )));
        }
        Ok(Self(raw.to_lowercase()))
    }

    /// Create an Email without validation.
    ///
    /// Intended for loading from a trusted source (the database) where
    /// validation was already performed at write time.
    #[inline]
    pub fn new_unchecked(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume self and return the inner String.
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Email({})", self.0)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Email {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Email {
    type Error = AuthError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for Email {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Email> for String {
    fn from(email: Email) -> String {
        email.0
    }
}

// Serde Deserialize with validation
impl<'de> Deserialize<'de> for Email {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}
