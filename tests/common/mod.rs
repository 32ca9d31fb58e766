//! Shared fakes for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use exchange_compat_probe::{
    errors::{CompatError, CompatResult},
    network::{HttpFetcher, HttpReply, QueryParams},
    types::ExchangeConfig,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// What the fake server does for one request.
#[derive(Debug, Clone)]
pub enum Step {
    Reply {
        status: u16,
        body: String,
        headers: Vec<(String, String)>,
        delay: Duration,
    },
    Transport(String),
    /// Never answers; only a timeout gets the caller out.
    Hang,
}

impl Step {
    pub fn json(body: &str) -> Self {
        Step::Reply {
            status: 200,
            body: body.to_string(),
            headers: vec![("content-type".into(), "application/json".into())],
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16) -> Self {
        Step::Reply {
            status,
            body: String::new(),
            headers: Vec::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(self, by: Duration) -> Self {
        match self {
            Step::Reply { status, body, headers, .. } => Step::Reply { status, body, headers, delay: by },
            other => other,
        }
    }

    pub fn with_header(self, name: &str, value: &str) -> Self {
        match self {
            Step::Reply { status, body, mut headers, delay } => {
                headers.push((name.to_string(), value.to_string()));
                Step::Reply { status, body, headers, delay }
            }
            other => other,
        }
    }
}

/// Fetcher driven by a closure of (url, 1-based call number for that url).
pub struct ScriptedFetcher<F> {
    handler: F,
    calls: Mutex<HashMap<String, usize>>,
}

impl<F> ScriptedFetcher<F>
where
    F: Fn(&str, usize) -> Step + Send + Sync,
{
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }
}

#[async_trait]
impl<F> HttpFetcher for ScriptedFetcher<F>
where
    F: Fn(&str, usize) -> Step + Send + Sync,
{
    async fn get(&self, url: &str, _params: &QueryParams) -> CompatResult<HttpReply> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            let count = calls.entry(url.to_string()).or_insert(0);
            *count += 1;
            *count
        };

        match (self.handler)(url, call) {
            Step::Reply { status, body, headers, delay } => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(HttpReply {
                    status,
                    headers: headers.into_iter().map(|(k, v)| (k.to_ascii_lowercase(), v)).collect(),
                    body,
                })
            }
            Step::Transport(message) => Err(CompatError::transport(message)),
            Step::Hang => std::future::pending().await,
        }
    }
}

pub const BASE_URL: &str = "http://exchange.test";

pub fn binance_like(ws_url: Option<String>) -> ExchangeConfig {
    ExchangeConfig {
        id: "binance".to_string(),
        base_url: BASE_URL.to_string(),
        testnet_url: None,
        endpoints: [
            "/api/v3/ping",
            "/api/v3/time",
            "/api/v3/exchangeInfo",
            "/api/v3/ticker/24hr",
            "/api/v3/depth",
            "/api/v3/klines",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        ws_url,
        stream_subscription: None,
        auth_required: vec!["/api/v3/account".to_string()],
    }
}

pub fn url(path: &str) -> String {
    format!("{}{}", BASE_URL, path)
}

/// Well-formed binance-shaped bodies for every endpoint in `binance_like`.
pub fn healthy_binance_body(url: &str) -> &'static str {
    if url.ends_with("/ping") {
        "{}"
    } else if url.ends_with("/time") {
        r#"{"serverTime":1760600000000}"#
    } else if url.ends_with("/exchangeInfo") {
        r#"{"timezone":"UTC","symbols":[{"symbol":"BTCUSDT"}]}"#
    } else if url.contains("ticker") {
        r#"{"symbol":"BTCUSDT","price":"65000.00","volume":"1234.5"}"#
    } else if url.ends_with("/depth") {
        r#"{"lastUpdateId":1,"bids":[["65000.00","1.0"]],"asks":[["65001.00","1.0"]]}"#
    } else {
        r#"[[1760600000000,"65000.00","65100.00","64900.00","65050.00","10.0"]]"#
    }
}
