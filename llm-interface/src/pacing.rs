use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Keeps successive model requests at least `interval` apart.
///
/// Shared by every task of a batch, so raising the scoring concurrency does
/// not raise the request rate. A zero interval disables pacing.
#[derive(Debug)]
pub struct RequestPacer {
    interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestPacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until the next request may go out and claims that slot.
    pub async fn wait(&self) {
        if self.interval.is_zero() {
            return;
        }
        // Held across the sleep so waiting tasks queue up in turn.
        let mut last_request = self.last_request.lock().await;
        if let Some(previous) = *last_request {
            let ready_at = previous + self.interval;
            if ready_at > Instant::now() {
                debug!(
                    "Pacing model request for {:?}",
                    ready_at.saturating_duration_since(Instant::now())
                );
                sleep_until(ready_at).await;
            }
        }
        *last_request = Some(Instant::now());
    }
}

impl Default for RequestPacer {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}
