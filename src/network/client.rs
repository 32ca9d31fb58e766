//! HTTP seam used by every REST probe

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::debug;
use crate::errors::{CompatError, CompatResult};

pub type QueryParams = BTreeMap<String, String>;

/// A fully-read HTTP response. Header names are lowercased.
#[derive(Debug, Clone, Default)]
pub struct HttpReply {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl HttpReply {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn content_type(&self) -> &str {
        self.header("content-type").unwrap_or_default()
    }
}

#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// Issues one GET. Any HTTP status is a successful fetch; only transport
    /// failures and timeouts are errors.
    async fn get(&self, url: &str, params: &QueryParams) -> CompatResult<HttpReply>;
}

pub struct ReqwestFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestFetcher {
    pub fn new(timeout: Duration) -> CompatResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("exchange-compat-probe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CompatError::Config {
                message: "Failed to build HTTP client".to_string(),
                source: Some(e.into()),
            })?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &str, params: &QueryParams) -> CompatResult<HttpReply> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| CompatError::from_reqwest(e, self.timeout))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| CompatError::from_reqwest(e, self.timeout))?;

        debug!(url, status, bytes = body.len(), "HTTP GET complete");
        Ok(HttpReply { status, headers, body })
    }
}
