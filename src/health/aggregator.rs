//! Fan-out/fan-in over the configured targets.
//!
//! # Responsibilities
//! - Probe every target concurrently, one future per target
//! - Wait for all probes (a barrier, not a race)
//! - Reduce the results into an `AggregatedHealth`
//!
//! # Design Decisions
//! - `join_all` keeps results in target order regardless of completion order
//! - Each probe owns its timeout; a hung target never delays the others past it
//! - No cross-probe cancellation and no concurrency bound

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures_util::future::join_all;

use crate::config::TargetConfig;
use crate::health::model::{AggregateStatus, AggregatedHealth};
use crate::health::probe::Prober;

/// Runs aggregation cycles over an immutable target list.
#[derive(Debug, Clone)]
pub struct Aggregator {
    targets: Arc<[TargetConfig]>,
    prober: Prober,
}

impl Aggregator {
    pub fn new(targets: Vec<TargetConfig>, prober: Prober) -> Self {
        Self {
            targets: targets.into(),
            prober,
        }
    }

    pub fn targets(&self) -> &[TargetConfig] {
        &self.targets
    }

    /// Run one aggregation cycle. Always produces a complete summary.
    pub async fn aggregate(&self) -> AggregatedHealth {
        let started = Instant::now();

        let probes = self.targets.iter().map(|target| self.prober.probe(target));
        let results = join_all(probes).await;

        let summary = AggregatedHealth::from_results(results, Utc::now());

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match summary.status {
            AggregateStatus::Ok => tracing::info!(
                up = summary.up,
                total = summary.total,
                elapsed_ms,
                "Aggregation complete"
            ),
            _ => tracing::warn!(
                status = ?summary.status,
                up = summary.up,
                down = summary.down,
                total = summary.total,
                elapsed_ms,
                "Aggregation complete with unhealthy targets"
            ),
        }

        summary
    }
}
