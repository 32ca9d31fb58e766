//! Rate-limit discovery and recovery timing

use std::collections::BTreeMap;
use tokio::time::Instant;
use tracing::{info, warn};
use crate::{
    config::{ProbeTimings, MAX_BURST_REQUESTS, MAX_RECOVERY_WINDOW_SECS},
    errors::{CompatError, CompatResult},
    network::{HttpFetcher, HttpReply, QueryParams},
    types::{ExchangeConfig, RateLimitResult, RateLimitStatus},
    validation::default_params,
};
use super::timed_get;

/// Rate-limit headers recorded during the burst, keyed by exact lowercase
/// header name. New venues need an explicit entry here.
pub const RATE_LIMIT_HEADERS: &[(&str, &str)] = &[
    ("x-mbx-used-weight", "used_weight"),   // binance
    ("x-ratelimit-remaining", "remaining"), // generic
    ("remaining-req", "remaining_req"),     // upbit
];

const THROTTLED: u16 = 429;

fn record_headers(reply: &HttpReply, seen: &mut BTreeMap<String, String>) {
    for (header, label) in RATE_LIMIT_HEADERS {
        if let Some(value) = reply.header(header) {
            seen.insert(label.to_string(), value.to_string());
        }
    }
}

/// Polls until the endpoint stops answering 429. Returns whole seconds
/// elapsed, or `None` if the window ran out first.
async fn measure_recovery(
    fetcher: &dyn HttpFetcher,
    url: &str,
    params: &QueryParams,
    timings: &ProbeTimings,
) -> CompatResult<Option<u64>> {
    let window = timings
        .recovery_window
        .min(std::time::Duration::from_secs(MAX_RECOVERY_WINDOW_SECS));
    let started = Instant::now();

    while started.elapsed() < window {
        tokio::time::sleep(timings.recovery_poll).await;

        let remaining = window.saturating_sub(started.elapsed());
        if remaining.is_zero() {
            break;
        }
        let (_, outcome) = timed_get(fetcher, url, params, timings.request_timeout.min(remaining)).await;
        match outcome {
            Ok(reply) if reply.status != THROTTLED => return Ok(Some(started.elapsed().as_secs())),
            Ok(_) => {}
            // running out the window while throttled is not a transport failure
            Err(CompatError::Timeout { .. }) if started.elapsed() >= window => break,
            Err(e) => return Err(e),
        }
    }

    Ok(None)
}

/// Fires a paced burst at the first endpoint until it answers 429, then
/// times how long the throttle lasts.
pub async fn probe_rate_limit(
    fetcher: &dyn HttpFetcher,
    exchange: &ExchangeConfig,
    timings: &ProbeTimings,
) -> RateLimitResult {
    let Some(endpoint) = exchange.representative_endpoint() else {
        return RateLimitResult::errored("No endpoints configured");
    };
    let url = exchange.endpoint_url(endpoint);
    let params = default_params(&exchange.id, endpoint);
    let burst_size = timings.burst_size.min(MAX_BURST_REQUESTS);

    let mut request_count = 0u32;
    let mut requests_before_limit = 0u32;
    let mut rate_limit_detected = false;
    let mut recovery_time_seconds = 0u64;
    let mut rate_limit_headers = BTreeMap::new();
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    for _ in 0..burst_size {
        let (_, outcome) = timed_get(fetcher, &url, &params, timings.request_timeout).await;
        let reply = match outcome {
            Ok(reply) => reply,
            Err(e) => {
                warn!(exchange = %exchange.id, request_count, error = %e, "rate limit burst aborted");
                issues.push(format!("Error during rate limit test: {}", e.issue()));
                break;
            }
        };

        request_count += 1;
        record_headers(&reply, &mut rate_limit_headers);

        if reply.status == THROTTLED {
            rate_limit_detected = true;
            requests_before_limit = request_count;
            info!(exchange = %exchange.id, requests_before_limit, "rate limit triggered, measuring recovery");

            match measure_recovery(fetcher, &url, &params, timings).await {
                Ok(Some(seconds)) => recovery_time_seconds = seconds,
                Ok(None) => warnings.push(format!(
                    "No recovery observed within {}s",
                    timings.recovery_window.as_secs().min(MAX_RECOVERY_WINDOW_SECS)
                )),
                Err(e) => issues.push(format!("Error during rate limit test: {}", e.issue())),
            }
            break;
        }

        tokio::time::sleep(timings.burst_pacing).await;
    }

    let status = if rate_limit_detected {
        RateLimitStatus::Detected
    } else {
        warnings.push("Rate limit not triggered - may need adjustment".to_string());
        RateLimitStatus::NotTriggered
    };

    info!(
        exchange = %exchange.id,
        status = ?status,
        requests = request_count,
        recovery_time_seconds,
        "rate limit probe complete"
    );

    RateLimitResult {
        rate_limit_detected,
        requests_before_limit,
        rate_limit_headers,
        recovery_time_seconds,
        status,
        issues,
        warnings,
    }
}
