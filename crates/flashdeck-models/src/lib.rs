//! # Flashdeck Models
//!
//! Domain models for the Flashdeck credential and token lifecycle subsystem:
//!
//! - [`value_types`]: the validated, normalized [`Email`] value object
//! - [`users`]: the [`User`] credential (email + one-way password hash)
//! - [`auth`]: the [`LoginAttempt`] lockout state machine and the
//!   [`PasswordResetToken`] record with its expiry/consumption semantics

pub mod auth;
pub mod users;
pub mod value_types;

// Re-export commonly used types at crate root
pub use auth::{LoginAttempt, PasswordResetToken};
pub use users::User;
pub use value_types::Email;
