//! # Flashdeck Auth
//!
//! Signed-token and password primitives for the Flashdeck credential
//! subsystem:
//!
//! - [`claims`]: the wire format of token claims and the [`TokenKind`]
//!   discriminator
//! - [`jwt`]: the [`TokenCodec`] that issues and verifies signed tokens
//!   against an injected clock
//! - [`password`]: the [`PasswordHasher`] seam with its bcrypt
//!   implementation, and the [`PasswordPolicy`] strength rules

pub mod claims;
pub mod jwt;
pub mod password;

// Re-export commonly used types at crate root
pub use claims::{Claims, TokenKind};
pub use jwt::TokenCodec;
pub use password::{BcryptHasher, PasswordHasher, PasswordPolicy};
