//! Probe configuration settings and environment variable handling

use std::env;
use std::time::Duration;

// Endpoint probe constants
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const ENDPOINT_PACING_MS: u64 = 100;
pub const SLOW_RESPONSE_MS: u64 = 5000;

// Stream probe constants
pub const STREAM_WINDOW_SECS: u64 = 10;
pub const STREAM_POLL_SECS: u64 = 1;

// Latency sampler constants
pub const LATENCY_SAMPLES: u32 = 10;
pub const LATENCY_PACING_MS: u64 = 200;
pub const LATENCY_EXCELLENT_MS: f64 = 200.0;
pub const LATENCY_GOOD_MS: f64 = 500.0;
pub const LATENCY_ACCEPTABLE_MS: f64 = 1000.0;
pub const LATENCY_VARIANCE_LIMIT: f64 = 100_000.0; // ms²

// Rate-limit prober constants
pub const MAX_BURST_REQUESTS: u32 = 50;
pub const BURST_PACING_MS: u64 = 100;
pub const RECOVERY_POLL_SECS: u64 = 1;
pub const MAX_RECOVERY_WINDOW_SECS: u64 = 60;

// Run-level constants
pub const DEFAULT_RUN_DEADLINE_SECS: u64 = 900;
pub const MIN_RUN_DEADLINE_SECS: u64 = 60;
pub const DEFAULT_REPORT_FILE: &str = "exchange_compatibility_report.json";
pub const DEFAULT_LOG_DIR: &str = "output/logs";

/// Every timeout, pacing delay and window the probes use.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeTimings {
    pub request_timeout: Duration,
    pub endpoint_pacing: Duration,
    pub slow_response: Duration,
    pub stream_window: Duration,
    pub stream_poll: Duration,
    pub latency_samples: u32,
    pub latency_pacing: Duration,
    pub burst_size: u32,
    pub burst_pacing: Duration,
    pub recovery_poll: Duration,
    pub recovery_window: Duration,
}

impl Default for ProbeTimings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            endpoint_pacing: Duration::from_millis(ENDPOINT_PACING_MS),
            slow_response: Duration::from_millis(SLOW_RESPONSE_MS),
            stream_window: Duration::from_secs(STREAM_WINDOW_SECS),
            stream_poll: Duration::from_secs(STREAM_POLL_SECS),
            latency_samples: LATENCY_SAMPLES,
            latency_pacing: Duration::from_millis(LATENCY_PACING_MS),
            burst_size: MAX_BURST_REQUESTS,
            burst_pacing: Duration::from_millis(BURST_PACING_MS),
            recovery_poll: Duration::from_secs(RECOVERY_POLL_SECS),
            recovery_window: Duration::from_secs(MAX_RECOVERY_WINDOW_SECS),
        }
    }
}

impl ProbeTimings {
    /// Caps the burst size and recovery window at their hard limits.
    pub fn clamped(mut self) -> Self {
        self.burst_size = self.burst_size.min(MAX_BURST_REQUESTS);
        self.recovery_window = self
            .recovery_window
            .min(Duration::from_secs(MAX_RECOVERY_WINDOW_SECS));
        self
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub report_file: String,
    pub log_dir: String,
    pub exchanges_file: Option<String>,
    pub exchange_filter: Option<Vec<String>>,
    pub run_deadline: Duration,
    pub timings: ProbeTimings,
}

impl Config {
    pub fn load() -> Self {
        let request_timeout_secs = env::var("COMPAT_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
            .clamp(1, MAX_REQUEST_TIMEOUT_SECS);

        Self {
            report_file: env::var("COMPAT_REPORT_FILE")
                .unwrap_or_else(|_| DEFAULT_REPORT_FILE.to_string()),
            log_dir: env::var("COMPAT_LOG_DIR")
                .unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string()),
            exchanges_file: env::var("COMPAT_EXCHANGES_FILE").ok(),
            exchange_filter: env::var("COMPAT_EXCHANGES")
                .ok()
                .map(|s| parse_exchange_filter(&s))
                .filter(|ids| !ids.is_empty()),
            run_deadline: Duration::from_secs(
                env::var("COMPAT_RUN_DEADLINE_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_RUN_DEADLINE_SECS)
                    .max(MIN_RUN_DEADLINE_SECS),
            ),
            timings: ProbeTimings {
                request_timeout: Duration::from_secs(request_timeout_secs),
                ..ProbeTimings::default()
            }
            .clamped(),
        }
    }
}

fn parse_exchange_filter(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
