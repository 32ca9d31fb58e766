//! Per-probe result types

use serde::Serialize;
use std::collections::BTreeMap;
use super::{EndpointStatus, LatencyStatus, RateLimitStatus, SchemaValidation, StreamStatus};

#[derive(Debug, Clone, Serialize)]
pub struct EndpointResult {
    pub endpoint: String,
    pub status: EndpointStatus,
    pub response_time_ms: u64,
    pub status_code: u16,
    pub content_type: String,
    pub response_size: usize,
    pub schema_validation: SchemaValidation,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

impl EndpointResult {
    /// Placeholder for an endpoint whose probe never got to run.
    pub fn aborted(endpoint: &str, reason: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            status: EndpointStatus::Error,
            response_time_ms: 0,
            status_code: 0,
            content_type: String::new(),
            response_size: 0,
            schema_validation: SchemaValidation::NotTested,
            issues: vec![reason.to_string()],
            warnings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StreamResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub status: StreamStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub connection_time_ms: u64,
    pub messages_received: u64,
    pub message_format_valid: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

impl StreamResult {
    pub fn skipped(reason: &str) -> Self {
        Self {
            url: None,
            status: StreamStatus::Skipped,
            reason: Some(reason.to_string()),
            connection_time_ms: 0,
            messages_received: 0,
            message_format_valid: false,
            issues: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn errored(url: Option<String>, reason: &str) -> Self {
        Self {
            url,
            status: StreamStatus::Error,
            reason: None,
            connection_time_ms: 0,
            messages_received: 0,
            message_format_valid: false,
            issues: vec![reason.to_string()],
            warnings: Vec::new(),
        }
    }
}

/// Latency statistics. `min_latency_ms` starts at infinity and stays there
/// when no sample succeeded; JSON renders it as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct LatencyResult {
    pub measurements: Vec<f64>,
    pub average_latency_ms: f64,
    pub min_latency_ms: f64,
    pub max_latency_ms: f64,
    pub latency_variance: f64,
    pub status: LatencyStatus,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

impl LatencyResult {
    pub fn failed(issue: &str) -> Self {
        Self {
            measurements: Vec::new(),
            average_latency_ms: 0.0,
            min_latency_ms: f64::INFINITY,
            max_latency_ms: 0.0,
            latency_variance: 0.0,
            status: LatencyStatus::Fail,
            issues: vec![issue.to_string()],
            warnings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RateLimitResult {
    pub rate_limit_detected: bool,
    pub requests_before_limit: u32,
    pub rate_limit_headers: BTreeMap<String, String>,
    pub recovery_time_seconds: u64,
    pub status: RateLimitStatus,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

impl RateLimitResult {
    pub fn errored(issue: &str) -> Self {
        Self {
            rate_limit_detected: false,
            requests_before_limit: 0,
            rate_limit_headers: BTreeMap::new(),
            recovery_time_seconds: 0,
            status: RateLimitStatus::Error,
            issues: vec![issue.to_string()],
            warnings: Vec::new(),
        }
    }
}
