//! Admission control for in-flight dispatches.
//!
//! # Responsibilities
//! - Cap the number of simultaneously admitted dispatches
//! - Park callers while the cap is reached (no spinning, no timeout)
//! - Release exactly once per admission on every exit path
//!
//! # Design Decisions
//! - Backed by a Tokio semaphore; waiters are served roughly FIFO
//! - Release is tied to the slot's lifetime, so early returns and panics
//!   cannot leak capacity

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::dispatch::error::DispatchError;
use crate::observability::metrics;

/// A fixed-capacity admission gate shared by every dispatch.
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
    admitted: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl ConcurrencyLimiter {
    /// Create a limiter admitting at most `capacity` holders at once.
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
            admitted: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Wait for a free slot.
    ///
    /// The returned slot must be held for as long as the admitted work runs.
    pub async fn acquire(&self) -> Result<AdmissionSlot, DispatchError> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| DispatchError::LimiterClosed)?;

        let admitted = self.admitted.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(admitted, Ordering::SeqCst);
        metrics::set_admitted(admitted);

        tracing::trace!(
            admitted,
            available_permits = self.semaphore.available_permits(),
            "Slot acquired"
        );

        Ok(AdmissionSlot {
            admitted: Arc::clone(&self.admitted),
            _permit: permit,
        })
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of currently admitted holders.
    pub fn in_use(&self) -> usize {
        self.admitted.load(Ordering::SeqCst)
    }

    /// Number of slots free right now.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Highest number of simultaneously admitted holders observed.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// One held admission slot. Dropping it frees the slot.
#[derive(Debug)]
pub struct AdmissionSlot {
    admitted: Arc<AtomicUsize>,
    _permit: OwnedSemaphorePermit,
}

impl AdmissionSlot {
    /// Release the slot now rather than at end of scope.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for AdmissionSlot {
    fn drop(&mut self) {
        // Runs before the permit field is dropped, so `in_use` never exceeds capacity.
        let admitted = self.admitted.fetch_sub(1, Ordering::SeqCst) - 1;
        metrics::set_admitted(admitted);
        tracing::trace!(admitted, "Slot released");
    }
}
