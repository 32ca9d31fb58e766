//! Built-in exchange table and JSON override loading

use std::fs;
use std::path::Path;
use crate::{
    errors::{CompatError, CompatResult},
    types::ExchangeConfig,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn default_exchanges() -> Vec<ExchangeConfig> {
    vec![
        ExchangeConfig {
            id: "binance".to_string(),
            base_url: "https://api.binance.com".to_string(),
            testnet_url: Some("https://testnet.binance.vision".to_string()),
            endpoints: strings(&[
                "/api/v3/ping",
                "/api/v3/time",
                "/api/v3/exchangeInfo",
                "/api/v3/ticker/24hr",
                "/api/v3/depth",
                "/api/v3/klines",
            ]),
            ws_url: Some("wss://stream.binance.com:9443/ws/btcusdt@ticker".to_string()),
            stream_subscription: None,
            auth_required: strings(&["/api/v3/account", "/api/v3/order"]),
        },
        ExchangeConfig {
            id: "upbit".to_string(),
            base_url: "https://api.upbit.com".to_string(),
            testnet_url: None,
            endpoints: strings(&[
                "/v1/market/all",
                "/v1/ticker",
                "/v1/orderbook",
                "/v1/candles/minutes/1",
            ]),
            ws_url: Some("wss://api.upbit.com/websocket/v1".to_string()),
            stream_subscription: Some(
                r#"[{"ticket":"exchange-compat-probe"},{"type":"ticker","codes":["KRW-BTC"]}]"#
                    .to_string(),
            ),
            auth_required: strings(&["/v1/accounts", "/v1/orders"]),
        },
    ]
}

/// Reads an exchange table from a JSON array of `ExchangeConfig` objects.
pub fn load_exchanges_file(path: impl AsRef<Path>) -> CompatResult<Vec<ExchangeConfig>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| CompatError::Config {
        message: format!("cannot read exchange table {}", path.display()),
        source: Some(e.into()),
    })?;
    let exchanges: Vec<ExchangeConfig> = serde_json::from_str(&raw).map_err(|e| CompatError::Config {
        message: format!("cannot parse exchange table {}", path.display()),
        source: Some(e.into()),
    })?;
    validate_exchanges(&exchanges)?;
    Ok(exchanges)
}

/// Keeps only the exchanges named in `filter`, preserving table order.
pub fn select_exchanges(exchanges: Vec<ExchangeConfig>, filter: Option<&[String]>) -> Vec<ExchangeConfig> {
    match filter {
        Some(ids) => exchanges
            .into_iter()
            .filter(|ex| ids.iter().any(|id| id.eq_ignore_ascii_case(&ex.id)))
            .collect(),
        None => exchanges,
    }
}

fn validate_exchanges(exchanges: &[ExchangeConfig]) -> CompatResult<()> {
    for (i, ex) in exchanges.iter().enumerate() {
        if ex.id.trim().is_empty() {
            return Err(CompatError::Config {
                message: format!("exchange #{} has an empty id", i),
                source: None,
            });
        }
        if !ex.base_url.starts_with("http://") && !ex.base_url.starts_with("https://") {
            return Err(CompatError::Config {
                message: format!("exchange {} has a non-HTTP base url: {}", ex.id, ex.base_url),
                source: None,
            });
        }
        if exchanges[..i].iter().any(|other| other.id == ex.id) {
            return Err(CompatError::Config {
                message: format!("exchange {} is listed twice", ex.id),
                source: None,
            });
        }
    }
    Ok(())
}
