//! Outcome counters for a run.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::dispatch::error::DispatchError;
use crate::dispatch::worker::DispatchOutcome;

/// Per-run outcome counters, updated by workers as they finish.
#[derive(Debug, Default)]
pub struct DispatchStats {
    delivered: AtomicU64,
    skipped: AtomicU64,
    invalid_url: AtomicU64,
    timed_out: AtomicU64,
    send_failed: AtomicU64,
    body_failed: AtomicU64,
    limiter_closed: AtomicU64,
}

impl DispatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished dispatch.
    pub fn record(&self, outcome: &DispatchOutcome) {
        let counter = match outcome {
            DispatchOutcome::Delivered { .. } => &self.delivered,
            DispatchOutcome::Skipped { .. } => &self.skipped,
            DispatchOutcome::Failed(err) => match err {
                DispatchError::InvalidUrl(_) => &self.invalid_url,
                DispatchError::Timeout { .. } => &self.timed_out,
                DispatchError::Send { .. } => &self.send_failed,
                DispatchError::BodyRead { .. } => &self.body_failed,
                DispatchError::LimiterClosed => &self.limiter_closed,
            },
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> RunSummary {
        RunSummary {
            delivered: self.delivered.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            invalid_url: self.invalid_url.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
            send_failed: self.send_failed.load(Ordering::Relaxed),
            body_failed: self.body_failed.load(Ordering::Relaxed),
            limiter_closed: self.limiter_closed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`DispatchStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub delivered: u64,
    pub skipped: u64,
    pub invalid_url: u64,
    pub timed_out: u64,
    pub send_failed: u64,
    pub body_failed: u64,
    pub limiter_closed: u64,
}

impl RunSummary {
    /// Dispatches that ended in an error.
    pub fn failed(&self) -> u64 {
        self.invalid_url
            + self.timed_out
            + self.send_failed
            + self.body_failed
            + self.limiter_closed
    }

    /// Every finished dispatch.
    pub fn total(&self) -> u64 {
        self.delivered + self.skipped + self.failed()
    }
}
