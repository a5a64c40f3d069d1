//! Trailing-edge debounce for search-triggered fetches.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

/// Only the last call within the delay window settles.
///
/// Each [`settle`](Debouncer::settle) call supersedes every earlier one that
/// is still waiting. Clones share the same window.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the delay. Returns `false` if a newer call arrived meanwhile.
    pub async fn settle(&self) -> bool {
        let mine = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        self.generation.load(Ordering::SeqCst) == mine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_single_call_settles() {
        let debouncer = Debouncer::default();
        assert!(debouncer.settle().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_call_supersedes() {
        let debouncer = Debouncer::from_millis(400);

        let first = tokio::spawn({
            let d = debouncer.clone();
            async move { d.settle().await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = tokio::spawn({
            let d = debouncer.clone();
            async move { d.settle().await }
        });

        assert!(!first.await.unwrap());
        assert!(second.await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_outside_window_both_settle() {
        let debouncer = Debouncer::from_millis(50);
        assert!(debouncer.settle().await);
        assert!(debouncer.settle().await);
    }
}
