//! Per-target dispatch unit.
//!
//! # Responsibilities
//! - Validate the target, take an admission slot, apply the destination gate
//! - Send the templated request under a per-dispatch deadline
//! - Read the full response body and report the outcome
//!
//! # Design Decisions
//! - Every failure stays inside the unit: it is logged, counted and dropped
//! - One deadline covers both the send and the body read
//! - Only expiry of this dispatch's own deadline is a timeout; transport-level
//!   timeouts (e.g. the connect/handshake timeout) are send errors

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::StatusCode;
use tokio::time::{timeout_at, Instant};
use tracing::Instrument;

use crate::dispatch::error::DispatchError;
use crate::dispatch::filter::DestinationFilter;
use crate::dispatch::limiter::ConcurrencyLimiter;
use crate::dispatch::stats::DispatchStats;
use crate::dispatch::template::RequestTemplate;
use crate::dispatch::tracker::CompletionGuard;
use crate::input::Target;
use crate::net::{validate_url, ValidatedUrl};
use crate::observability::metrics;

/// Relaxed ordering is enough; ids only need to be unique.
static DISPATCH_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for one dispatch, used to correlate its log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DispatchId(u64);

impl DispatchId {
    pub fn new() -> Self {
        Self(DISPATCH_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for DispatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DispatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dispatch-{}", self.0)
    }
}

/// State shared read-only by every dispatch of a run.
#[derive(Debug)]
pub struct DispatchContext {
    client: reqwest::Client,
    template: RequestTemplate,
    limiter: ConcurrencyLimiter,
    filter: DestinationFilter,
    timeout: Duration,
    stats: DispatchStats,
}

impl DispatchContext {
    pub fn new(
        client: reqwest::Client,
        template: RequestTemplate,
        limiter: ConcurrencyLimiter,
        filter: DestinationFilter,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            template,
            limiter,
            filter,
            timeout,
            stats: DispatchStats::new(),
        }
    }

    pub fn limiter(&self) -> &ConcurrencyLimiter {
        &self.limiter
    }

    pub fn filter(&self) -> &DestinationFilter {
        &self.filter
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn stats(&self) -> &DispatchStats {
        &self.stats
    }
}

/// How one dispatch ended.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// A response was received and its body read in full.
    Delivered {
        url: ValidatedUrl,
        status: StatusCode,
        body: Bytes,
    },
    /// The target validated but is not an allowed destination.
    Skipped { url: ValidatedUrl },
    /// The dispatch failed at some step.
    Failed(DispatchError),
}

impl DispatchOutcome {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchOutcome::Delivered { .. } => "delivered",
            DispatchOutcome::Skipped { .. } => "skipped",
            DispatchOutcome::Failed(err) => err.kind(),
        }
    }
}

/// Carry one target through validation, admission, send and body read.
pub async fn dispatch(ctx: &DispatchContext, target: Target) -> DispatchOutcome {
    match try_dispatch(ctx, &target).await {
        Ok(outcome) => outcome,
        Err(err) => DispatchOutcome::Failed(err),
    }
}

async fn try_dispatch(
    ctx: &DispatchContext,
    target: &Target,
) -> Result<DispatchOutcome, DispatchError> {
    let url = validate_url(&target.address)?;

    // Held until this function returns, on every path.
    let _slot = ctx.limiter.acquire().await?;

    if !ctx.filter.allows(&url) {
        return Ok(DispatchOutcome::Skipped { url });
    }

    let deadline = Instant::now() + ctx.timeout;
    let request = ctx.template.instantiate(url.as_url().clone());

    // Transport errors, including the client's own connect timeout, are send errors.
    let response = match timeout_at(deadline, ctx.client.execute(request)).await {
        Ok(Ok(response)) => response,
        Ok(Err(source)) => return Err(DispatchError::Send { url, source }),
        Err(_) => {
            return Err(DispatchError::Timeout {
                url,
                timeout: ctx.timeout,
            })
        }
    };

    let status = response.status();
    tracing::debug!(url = %url, status = %status, "Response received");

    // `bytes()` consumes the response, so its connection goes back to the pool
    // (or is closed) whether the read succeeds, fails or is cancelled.
    let body = match timeout_at(deadline, response.bytes()).await {
        Ok(Ok(body)) => body,
        Ok(Err(source)) => return Err(DispatchError::BodyRead { url, source }),
        Err(_) => {
            return Err(DispatchError::Timeout {
                url,
                timeout: ctx.timeout,
            })
        }
    };

    Ok(DispatchOutcome::Delivered { url, status, body })
}

/// Spawnable unit: dispatch, report, count, then complete.
///
/// `done` is dropped when this future finishes or is dropped, which is what
/// the orchestrator waits on.
pub async fn run_worker(ctx: Arc<DispatchContext>, target: Target, done: CompletionGuard) {
    let id = DispatchId::new();
    let span = tracing::info_span!("dispatch", dispatch_id = %id);

    async move {
        let _done = done;
        let started = std::time::Instant::now();

        let outcome = dispatch(&ctx, target).await;

        report(&outcome);
        metrics::record_outcome(outcome.kind(), started.elapsed());
        ctx.stats.record(&outcome);
    }
    .instrument(span)
    .await
}

fn report(outcome: &DispatchOutcome) {
    match outcome {
        DispatchOutcome::Delivered { url, status, body } => {
            tracing::info!(
                url = %url,
                status = %status,
                bytes = body.len(),
                "Received data: {}",
                String::from_utf8_lossy(body)
            );
        }
        DispatchOutcome::Skipped { url } => {
            tracing::debug!(url = %url, "Destination not allowed, skipping");
        }
        DispatchOutcome::Failed(err @ DispatchError::InvalidUrl(url_err)) => {
            tracing::warn!(address = %url_err.raw, error = %err, "Invalid URL");
        }
        DispatchOutcome::Failed(err @ DispatchError::Timeout { url, .. }) => {
            tracing::warn!(url = %url, error = %err, "Request timed out");
        }
        DispatchOutcome::Failed(err) => {
            tracing::error!(kind = err.kind(), error = %err, "Dispatch failed");
        }
    }
}
