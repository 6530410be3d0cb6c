//! Suspension between passes.

use async_trait::async_trait;
use std::time::Duration;

/// Waits out a backoff delay.
///
/// The orchestrator never sleeps directly, so tests can substitute an
/// implementation that records delays instead of waiting.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend the current task for `delay`.
    async fn sleep(&self, delay: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
