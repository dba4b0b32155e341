//! Completion tracking for dispatched work.
//!
//! # Responsibilities
//! - Count dispatches that have been launched but not yet finished
//! - Decrement exactly once per dispatch, whatever the outcome
//! - Let the orchestrator park until the count reaches zero

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct TrackerInner {
    pending: AtomicUsize,
    notify: Notify,
}

/// A join barrier over a set of dispatches.
///
/// Create every guard with [`CompletionTracker::track`] before spawning any
/// work, then move one guard into each task.
#[derive(Debug, Clone, Default)]
pub struct CompletionTracker {
    inner: Arc<TrackerInner>,
}

impl CompletionTracker {
    /// Create a tracker with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one unit of pending work. Returns a guard that completes it on drop.
    pub fn track(&self) -> CompletionGuard {
        self.inner.pending.fetch_add(1, Ordering::AcqRel);
        CompletionGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Number of units not yet finished.
    pub fn pending(&self) -> usize {
        self.inner.pending.load(Ordering::Acquire)
    }

    /// Wait until every tracked unit has finished.
    pub async fn wait(&self) {
        loop {
            // Registered before the check so a wakeup in between is not lost.
            let notified = self.inner.notify.notified();
            if self.pending() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// Marks one tracked unit finished when dropped.
#[derive(Debug)]
pub struct CompletionGuard {
    inner: Arc<TrackerInner>,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if self.inner.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.inner.notify.notify_waiters();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn wait_returns_immediately_when_idle() {
        let tracker = CompletionTracker::new();
        tokio::time::timeout(Duration::from_millis(100), tracker.wait())
            .await
            .expect("nothing pending");
    }

    #[test]
    fn guards_count_down() {
        let tracker = CompletionTracker::new();
        let a = tracker.track();
        let b = tracker.track();
        assert_eq!(tracker.pending(), 2);

        drop(a);
        assert_eq!(tracker.pending(), 1);
        drop(b);
        assert_eq!(tracker.pending(), 0);
    }

    #[tokio::test]
    async fn wait_blocks_until_last_guard_drops() {
        let tracker = CompletionTracker::new();
        let guards: Vec<_> = (0..5).map(|_| tracker.track()).collect();

        let mut handles = Vec::new();
        for (i, guard) in guards.into_iter().enumerate() {
            handles.push(tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(10 * (5 - i as u64))).await;
                drop(guard);
            }));
        }

        let early = tokio::time::timeout(Duration::from_millis(5), tracker.wait()).await;
        assert!(early.is_err(), "wait must not return while work is pending");

        tokio::time::timeout(Duration::from_secs(2), tracker.wait())
            .await
            .expect("all guards dropped");
        assert_eq!(tracker.pending(), 0);
    }

    #[tokio::test]
    async fn panicking_task_still_completes() {
        let tracker = CompletionTracker::new();
        let guard = tracker.track();

        let result = tokio::spawn(async move {
            let _guard = guard;
            panic!("fault injected");
        })
        .await;

        assert!(result.is_err());
        tokio::time::timeout(Duration::from_millis(500), tracker.wait())
            .await
            .expect("guard dropped during unwind");
    }
}
