//! # Flashdeck Config
//!
//! Configuration types for the Flashdeck auth subsystem.
//!
//! This crate provides configuration structures loaded from environment
//! variables:
//!
//! - [`jwt`]: signing secret and token lifetimes
//! - [`lockout`]: failed-attempt threshold and lockout duration
//! - [`cleanup`]: sweep interval for the reset-token cleanup task
//! - [`database`]: PostgreSQL connection pool initialization
//!
//! # Example
//!
//! ```ignore
//! use flashdeck_config::{CleanupConfig, JwtConfig, LockoutConfig};
//!
//! // Load all configs from environment
//! let jwt_config = JwtConfig::from_env();
//! let lockout_config = LockoutConfig::from_env();
//! let cleanup_config = CleanupConfig::from_env();
//! ```

pub mod cleanup;
pub mod database;
pub mod jwt;
pub mod lockout;

// Re-export commonly used types at crate root
pub use cleanup::CleanupConfig;
pub use database::init_db_pool;
pub use jwt::JwtConfig;
pub use lockout::LockoutConfig;
