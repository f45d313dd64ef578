use std::env;

/// Interval for the reset-token cleanup sweep.
#[derive(Clone, Copy, Debug)]
pub struct CleanupConfig {
    pub interval_seconds: u64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 300, // 5 minutes
        }
    }
}

impl CleanupConfig {
    pub fn from_env() -> Self {
        Self {
            interval_seconds: env::var("CLEANUP_INTERVAL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        }
    }
}
