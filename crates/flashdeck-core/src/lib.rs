//! # Flashdeck Core
//!
//! Core types for the Flashdeck credential and token lifecycle subsystem.
//!
//! This crate provides the foundation the rest of the workspace builds on:
//!
//! - [`errors`]: the closed [`AuthError`] taxonomy returned by every operation
//! - [`clock`]: an injectable [`Clock`] so time-dependent logic is
//!   deterministic under test
//!
//! # Example
//!
//! ```ignore
//! use flashdeck_core::{AuthError, Clock};
//!
//! let clock = Clock::system();
//! let now = clock.now();
//!
//! let err = AuthError::UserNotFound;
//! ```

pub mod clock;
pub mod errors;

// Re-export commonly used types at crate root
pub use clock::Clock;
pub use errors::AuthError;
