//! Shared harness: in-memory stores, a fixed clock and fast hashing.

use std::sync::Arc;

use flashdeck::state::AppState;
use flashdeck::store::MemoryStore;
use flashdeck_auth::BcryptHasher;
use flashdeck_config::{CleanupConfig, JwtConfig, LockoutConfig};
use flashdeck_core::Clock;
use flashdeck_models::User;

pub const EMAIL: &str = "user@example.com";
pub const PASSWORD: &str = "Correct1Horse";

pub fn test_state() -> (Arc<AppState>, Arc<MemoryStore>, Arc<Clock>) {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(Clock::fixed(chrono::Utc::now()));

    let state = AppState::new(
        store.clone(),
        store.clone(),
        store.clone(),
        clock.clone(),
        // Low cost keeps the tests fast.
        Arc::new(BcryptHasher::with_cost(4)),
        &JwtConfig {
            secret: "test-secret-key".to_string(),
            auth_token_expiry: 3600,
            reset_token_expiry: 900,
        },
        LockoutConfig::default(),
        CleanupConfig {
            interval_seconds: 1,
        },
    );
    (Arc::new(state), store, clock)
}

#[allow(dead_code)]
pub async fn register_user(state: &AppState) -> User {
    state
        .user_service
        .register(EMAIL, PASSWORD)
        .await
        .expect("registration should succeed")
}
