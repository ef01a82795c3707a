//! Minimum delay between outbound requests.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::trace;

/// Spaces requests at least `min_delay` apart.
///
/// Clones share the same clock, so every source behind one searcher is
/// throttled together.
#[derive(Debug, Clone)]
pub struct RequestGate {
    min_delay: Duration,
    last: Arc<Mutex<Option<Instant>>>,
}

impl RequestGate {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last: Arc::new(Mutex::new(None)),
        }
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    /// Wait out the remainder of the delay since the previous request.
    ///
    /// The lock is held while sleeping so concurrent callers queue up.
    pub async fn wait(&self) {
        let mut last = self.last.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_delay {
                let remaining = self.min_delay - elapsed;
                trace!(?remaining, "Delaying outbound request");
                tokio::time::sleep(remaining).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_request_passes_immediately() {
        let gate = RequestGate::new(Duration::from_secs(5));
        let start = Instant::now();
        gate.wait().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_consecutive_requests_are_spaced() {
        let gate = RequestGate::new(Duration::from_millis(50));
        let start = Instant::now();
        gate.wait().await;
        gate.wait().await;
        gate.clone().wait().await;
        assert!(start.elapsed() >= Duration::from_millis(100));
    }
}
