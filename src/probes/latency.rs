//! Latency sampling against an exchange's representative endpoint

use tracing::{debug, info};
use crate::{
    config::{ProbeTimings, LATENCY_ACCEPTABLE_MS, LATENCY_EXCELLENT_MS, LATENCY_GOOD_MS, LATENCY_VARIANCE_LIMIT},
    network::HttpFetcher,
    types::{ExchangeConfig, LatencyResult, LatencyStatus},
    utils::{millis_f64, sample_stats},
    validation::default_params,
};
use super::timed_get;

/// Tier for a mean latency. Each tier's lower bound is inclusive.
pub fn classify_latency(mean_ms: f64) -> LatencyStatus {
    if mean_ms < LATENCY_EXCELLENT_MS {
        LatencyStatus::Excellent
    } else if mean_ms < LATENCY_GOOD_MS {
        LatencyStatus::Good
    } else if mean_ms < LATENCY_ACCEPTABLE_MS {
        LatencyStatus::Acceptable
    } else {
        LatencyStatus::Poor
    }
}

/// Builds the latency result from whatever samples succeeded.
pub fn summarize_latency(measurements: Vec<f64>) -> LatencyResult {
    let Some(stats) = sample_stats(&measurements) else {
        return LatencyResult::failed("Could not measure latency");
    };

    let status = classify_latency(stats.mean);
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    match status {
        LatencyStatus::Acceptable => warnings.push("Higher than expected latency".to_string()),
        LatencyStatus::Poor => issues.push("High latency detected".to_string()),
        _ => {}
    }
    if stats.variance > LATENCY_VARIANCE_LIMIT {
        warnings.push("High latency variance detected".to_string());
    }

    LatencyResult {
        measurements,
        average_latency_ms: stats.mean,
        min_latency_ms: stats.min,
        max_latency_ms: stats.max,
        latency_variance: stats.variance,
        status,
        issues,
        warnings,
    }
}

/// Takes sequential timed samples of the first endpoint. Errors, timeouts
/// and non-200 replies are dropped rather than counted.
pub async fn sample_latency(
    fetcher: &dyn HttpFetcher,
    exchange: &ExchangeConfig,
    timings: &ProbeTimings,
) -> LatencyResult {
    let Some(endpoint) = exchange.representative_endpoint() else {
        return LatencyResult::failed("No endpoints configured");
    };
    let url = exchange.endpoint_url(endpoint);
    let params = default_params(&exchange.id, endpoint);

    let mut measurements = Vec::with_capacity(timings.latency_samples as usize);
    for attempt in 1..=timings.latency_samples {
        let (elapsed, outcome) = timed_get(fetcher, &url, &params, timings.request_timeout).await;
        match outcome {
            Ok(reply) if reply.status == 200 => measurements.push(millis_f64(elapsed)),
            Ok(reply) => debug!(exchange = %exchange.id, attempt, status = reply.status, "latency sample dropped"),
            Err(e) => debug!(exchange = %exchange.id, attempt, error = %e, "latency sample dropped"),
        }
        tokio::time::sleep(timings.latency_pacing).await;
    }

    let result = summarize_latency(measurements);
    info!(
        exchange = %exchange.id,
        status = ?result.status,
        samples = result.measurements.len(),
        mean_ms = result.average_latency_ms,
        "latency sampling complete"
    );
    result
}
