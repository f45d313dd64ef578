//! Periodic purge of expired and consumed password-reset tokens.
//!
//! The sweep keeps the reset-token table from growing without bound. It is
//! advisory only: correctness never depends on it, because lookups check
//! expiry and consumption themselves.

use crate::store::ResetTokenStore;
use flashdeck_config::CleanupConfig;
use flashdeck_core::{AuthError, Clock};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

/// Delete every token that is expired or already used, returning the
/// number of rows removed.
pub async fn run_once(tokens: &dyn ResetTokenStore, clock: &Clock) -> Result<u64, AuthError> {
    let removed = tokens.delete_expired_or_used(clock.now()).await?;
    if removed > 0 {
        info!(removed, "purged expired or used password reset tokens");
    }
    Ok(removed)
}

/// Run the sweep on a fixed interval until the handle is aborted.
///
/// A failed sweep is logged and retried at the next tick; the task never
/// exits on error.
pub fn spawn(
    tokens: Arc<dyn ResetTokenStore>,
    clock: Arc<Clock>,
    config: CleanupConfig,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(config.interval_seconds));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            interval_seconds = config.interval_seconds,
            "password reset token cleanup task started"
        );

        loop {
            ticker.tick().await;
            if let Err(e) = run_once(tokens.as_ref(), &clock).await {
                error!(error = %e, "password reset token cleanup failed");
            }
        }
    })
}
