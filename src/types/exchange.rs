//! Exchange configuration types

use serde::{Deserialize, Serialize};

/// Static description of one exchange's public API surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    pub id: String,
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testnet_url: Option<String>,
    pub endpoints: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws_url: Option<String>,
    /// Text frame sent right after the stream connects, for venues that
    /// only push data once subscribed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_subscription: Option<String>,
    /// Informational only. These paths are never called.
    #[serde(default)]
    pub auth_required: Vec<String>,
}

impl ExchangeConfig {
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    /// Latency sampling and rate-limit probing both target the first endpoint.
    pub fn representative_endpoint(&self) -> Option<&str> {
        self.endpoints.first().map(String::as_str)
    }
}
