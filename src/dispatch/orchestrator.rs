//! Run orchestration.
//!
//! # Responsibilities
//! - Load the target list and build the shared template (fatal on failure)
//! - Launch one worker per target without waiting on any of them
//! - Wait for every worker to finish, then report the run summary
//!
//! # Design Decisions
//! - No global cancellation: running workers always finish on their own
//! - The orchestrator observes completion only, never individual outcomes

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::config::FanoutConfig;
use crate::dispatch::error::{StartupError, StartupResult};
use crate::dispatch::filter::DestinationFilter;
use crate::dispatch::limiter::ConcurrencyLimiter;
use crate::dispatch::stats::RunSummary;
use crate::dispatch::template::{Payload, RequestTemplate};
use crate::dispatch::tracker::CompletionTracker;
use crate::dispatch::worker::{run_worker, DispatchContext};
use crate::input::{load_targets, Target};
use crate::net::build_client;

/// Fans a target list out to concurrent workers sharing one context.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    ctx: Arc<DispatchContext>,
}

impl Dispatcher {
    pub fn new(ctx: DispatchContext) -> Self {
        Self { ctx: Arc::new(ctx) }
    }

    /// Build the client, template, limiter and gate described by `config`.
    pub fn from_config(config: &FanoutConfig) -> StartupResult<Self> {
        let dispatch = &config.dispatch;

        let template = RequestTemplate::build(&Payload::new(dispatch.payload_data.clone()))?;
        let client = build_client(&config.transport).map_err(StartupError::Transport)?;
        let filter = DestinationFilter::from_config(dispatch)?;
        let limiter = ConcurrencyLimiter::new(dispatch.max_concurrency);

        Ok(Self::new(DispatchContext::new(
            client,
            template,
            limiter,
            filter,
            Duration::from_millis(dispatch.request_timeout_ms),
        )))
    }

    pub fn context(&self) -> &DispatchContext {
        &self.ctx
    }

    /// Dispatch every target and wait for all of them.
    ///
    /// The summary counts every dispatch made through this dispatcher.
    pub async fn run(&self, targets: Vec<Target>) -> RunSummary {
        let tracker = CompletionTracker::new();
        // Every guard exists before the first worker starts.
        let guards: Vec<_> = targets.iter().map(|_| tracker.track()).collect();

        tracing::info!(
            targets = guards.len(),
            max_concurrency = self.ctx.limiter().capacity(),
            timeout_ms = self.ctx.timeout().as_millis() as u64,
            "Dispatching"
        );

        for (target, done) in targets.into_iter().zip(guards) {
            tokio::spawn(run_worker(Arc::clone(&self.ctx), target, done));
        }

        tracker.wait().await;

        self.ctx.stats().snapshot()
    }
}

/// Load targets, build the dispatcher and run it to completion.
pub async fn run(config: &FanoutConfig) -> StartupResult<RunSummary> {
    let targets = load_targets(Path::new(&config.dispatch.input_path))?;
    let dispatcher = Dispatcher::from_config(config)?;

    let summary = dispatcher.run(targets).await;

    tracing::info!(
        delivered = summary.delivered,
        skipped = summary.skipped,
        failed = summary.failed(),
        peak_admitted = dispatcher.context().limiter().peak(),
        "Dispatch complete"
    );

    Ok(summary)
}
