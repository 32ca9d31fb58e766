//! Per-exchange evaluation and the overall-status policy

use chrono::Utc;
use std::sync::Arc;
use tokio::time::{timeout_at, Instant};
use tracing::{info, warn};
use crate::{
    config::ProbeTimings,
    network::HttpFetcher,
    probes::{collect_rest_endpoints, probe_rate_limit, probe_stream, sample_latency},
    types::{
        EndpointResult, EndpointStatus, ExchangeConfig, ExchangeVerdict, LatencyResult, LatencyStatus,
        OverallStatus, RateLimitResult, StreamResult, StreamStatus,
    },
};

pub const DEADLINE_REASON: &str = "Run deadline exceeded";

const CRITICAL_FAILURE_LIMIT: usize = 2;
const WARNING_LIMIT: usize = 3;

/// Tallies critical failures and warnings across the REST, stream and
/// latency results. The rate-limit result is diagnostic only and never
/// feeds the verdict.
pub fn determine_overall_status(
    rest: &[EndpointResult],
    stream: &StreamResult,
    latency: &LatencyResult,
) -> OverallStatus {
    let mut critical_failures = 0;
    let mut warnings = 0;

    for result in rest {
        if result.status.is_critical() {
            critical_failures += 1;
        } else if result.status == EndpointStatus::RateLimited || !result.warnings.is_empty() {
            warnings += 1;
        }
    }

    match stream.status {
        StreamStatus::Fail | StreamStatus::Error => critical_failures += 1,
        _ if !stream.warnings.is_empty() => warnings += 1,
        _ => {}
    }

    match latency.status {
        LatencyStatus::Fail => critical_failures += 1,
        LatencyStatus::Poor => warnings += 1,
        _ => {}
    }

    if critical_failures > CRITICAL_FAILURE_LIMIT {
        OverallStatus::Critical
    } else if critical_failures > 0 {
        OverallStatus::Degraded
    } else if warnings > WARNING_LIMIT {
        OverallStatus::Warning
    } else {
        OverallStatus::Healthy
    }
}

fn prefixed<'a>(prefix: &'a str, items: &'a [String]) -> impl Iterator<Item = String> + 'a {
    items.iter().map(move |item| format!("{}: {}", prefix, item))
}

/// Freezes the four probe results into a verdict.
pub fn build_verdict(
    exchange: &str,
    rest: Vec<EndpointResult>,
    stream: StreamResult,
    latency: LatencyResult,
    rate_limit: RateLimitResult,
) -> ExchangeVerdict {
    let overall_status = determine_overall_status(&rest, &stream, &latency);

    let mut issues_found = Vec::new();
    let mut warnings = Vec::new();
    for result in &rest {
        issues_found.extend(prefixed(&result.endpoint, &result.issues));
        warnings.extend(prefixed(&result.endpoint, &result.warnings));
    }
    issues_found.extend(prefixed("websocket", &stream.issues));
    warnings.extend(prefixed("websocket", &stream.warnings));
    issues_found.extend(prefixed("latency", &latency.issues));
    warnings.extend(prefixed("latency", &latency.warnings));
    issues_found.extend(prefixed("rate_limit", &rate_limit.issues));
    warnings.extend(prefixed("rate_limit", &rate_limit.warnings));

    ExchangeVerdict {
        exchange: exchange.to_string(),
        timestamp: Utc::now(),
        rest_api_tests: rest,
        websocket_tests: stream,
        latency_tests: latency,
        rate_limit_tests: rate_limit,
        overall_status,
        issues_found,
        warnings,
    }
}

pub struct ExchangeEvaluator {
    fetcher: Arc<dyn HttpFetcher>,
    timings: ProbeTimings,
}

impl ExchangeEvaluator {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, timings: ProbeTimings) -> Self {
        Self {
            fetcher,
            timings: timings.clamped(),
        }
    }

    /// Runs every probe for one exchange. The REST suite, stream and latency
    /// probes run together; the rate-limit burst runs last because it throttles
    /// this client on purpose.
    ///
    /// Probes still running at `deadline` are cut off and reported as ERROR
    /// (or FAIL for latency). Results that finished before it are kept.
    pub async fn evaluate(&self, exchange: &ExchangeConfig, deadline: Instant) -> ExchangeVerdict {
        info!(exchange = %exchange.id, endpoints = exchange.endpoints.len(), "evaluating exchange");
        let fetcher = self.fetcher.as_ref();

        let mut rest = Vec::with_capacity(exchange.endpoints.len());
        let (rest_outcome, stream, latency) = tokio::join!(
            timeout_at(deadline, collect_rest_endpoints(fetcher, exchange, &self.timings, &mut rest)),
            timeout_at(deadline, probe_stream(exchange, &self.timings)),
            timeout_at(deadline, sample_latency(fetcher, exchange, &self.timings)),
        );

        if rest_outcome.is_err() {
            let finished = rest.len();
            warn!(exchange = %exchange.id, finished, "run deadline hit during REST suite");
            rest.extend(
                exchange.endpoints[finished..]
                    .iter()
                    .map(|endpoint| EndpointResult::aborted(endpoint, DEADLINE_REASON)),
            );
        }
        let stream = stream.unwrap_or_else(|_| {
            warn!(exchange = %exchange.id, "run deadline hit during stream probe");
            StreamResult::errored(exchange.ws_url.clone(), DEADLINE_REASON)
        });
        let latency = latency.unwrap_or_else(|_| {
            warn!(exchange = %exchange.id, "run deadline hit during latency sampling");
            LatencyResult::failed(DEADLINE_REASON)
        });
        let rate_limit = timeout_at(deadline, probe_rate_limit(fetcher, exchange, &self.timings))
            .await
            .unwrap_or_else(|_| {
                warn!(exchange = %exchange.id, "run deadline hit during rate limit burst");
                RateLimitResult::errored(DEADLINE_REASON)
            });

        let verdict = build_verdict(&exchange.id, rest, stream, latency, rate_limit);
        info!(exchange = %exchange.id, status = %verdict.overall_status, "exchange evaluated");
        verdict
    }
}

/// Verdict for an exchange cut off before any probe finished.
#[cfg(test)]
pub(crate) fn cut_off_verdict(exchange: &ExchangeConfig) -> ExchangeVerdict {
    let rest = exchange
        .endpoints
        .iter()
        .map(|endpoint| EndpointResult::aborted(endpoint, DEADLINE_REASON))
        .collect();
    build_verdict(
        &exchange.id,
        rest,
        StreamResult::errored(exchange.ws_url.clone(), DEADLINE_REASON),
        LatencyResult::failed(DEADLINE_REASON),
        RateLimitResult::errored(DEADLINE_REASON),
    )
}
