//! Default query parameters per exchange and endpoint

use crate::network::QueryParams;

struct ParamRule {
    exchange: &'static str,
    /// Substring of the endpoint path.
    pattern: &'static str,
    params: &'static [(&'static str, &'static str)],
}

// First matching rule per exchange wins, so order matters.
const PARAM_RULES: &[ParamRule] = &[
    ParamRule { exchange: "binance", pattern: "ticker", params: &[("symbol", "BTCUSDT")] },
    ParamRule { exchange: "binance", pattern: "depth", params: &[("symbol", "BTCUSDT"), ("limit", "10")] },
    ParamRule {
        exchange: "binance",
        pattern: "klines",
        params: &[("symbol", "BTCUSDT"), ("interval", "1h"), ("limit", "10")],
    },
    ParamRule { exchange: "upbit", pattern: "ticker", params: &[("markets", "KRW-BTC")] },
    ParamRule { exchange: "upbit", pattern: "orderbook", params: &[("markets", "KRW-BTC")] },
    ParamRule { exchange: "upbit", pattern: "candles", params: &[("market", "KRW-BTC"), ("count", "10")] },
];

/// Query parameters an endpoint needs to answer 200. Unknown combinations
/// get an empty map.
pub fn default_params(exchange: &str, endpoint: &str) -> QueryParams {
    PARAM_RULES
        .iter()
        .find(|rule| rule.exchange == exchange && endpoint.contains(rule.pattern))
        .map(|rule| {
            rule.params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        })
        .unwrap_or_default()
}
