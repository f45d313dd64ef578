//! # Flashdeck credential subsystem
//!
//! Login-attempt tracking with time-boxed lockout, signed-token issuance
//! and verification, and the two-step password-reset flow with periodic
//! cleanup of spent tokens.
//!
//! Services are wired through [`state::AppState`]; persistence sits behind
//! the traits in [`store`], with in-memory and Postgres backends.

pub mod logging;
pub mod maintenance;
pub mod modules;
pub mod state;
pub mod store;

pub use state::{AppState, init_app_state};
