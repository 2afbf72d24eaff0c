use std::time::Duration;

use async_trait::async_trait;

/// Suspends the current task.
///
/// Every wait in the pipeline (storage retry delay, inter-cycle wait) goes through this trait so
/// tests can substitute a sleeper that records requested durations instead of waiting.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Formats a duration as `HHh MMm SSs` for progress logging.
pub fn format_remaining(duration: Duration) -> String {
    let total = duration.as_secs();
    format!(
        "{:02}h {:02}m {:02}s",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
