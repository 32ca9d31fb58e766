//! Whole-run orchestration

use chrono::Utc;
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::info;
use crate::{
    config::ProbeTimings,
    network::HttpFetcher,
    types::{ExchangeConfig, RunReport},
};
use super::{generate_report, ExchangeEvaluator};

/// Evaluates every exchange concurrently and aggregates the verdicts.
/// Probes still running when `run_deadline` expires are reported as cut
/// off; anything that finished earlier is kept as measured.
pub async fn run_all(
    exchanges: &[ExchangeConfig],
    fetcher: Arc<dyn HttpFetcher>,
    timings: ProbeTimings,
    run_deadline: Duration,
) -> RunReport {
    let started_at = Utc::now();
    let deadline = Instant::now() + run_deadline;
    let evaluator = ExchangeEvaluator::new(fetcher, timings);

    info!(exchanges = exchanges.len(), deadline_secs = run_deadline.as_secs(), "starting exchange compatibility tests");

    let verdicts = join_all(exchanges.iter().map(|exchange| evaluator.evaluate(exchange, deadline))).await;

    generate_report(started_at, verdicts)
}
