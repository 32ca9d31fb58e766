//! Response shape validation
//!
//! A lookup table keyed by exchange and path. Adding a venue means adding
//! entries to `SCHEMA_RULES`; the probe code never changes.

use serde_json::Value;
use tracing::debug;
use crate::types::SchemaValidation;

#[derive(Debug, Clone, Copy)]
enum PathMatch {
    Exact(&'static str),
    Contains(&'static str),
}

impl PathMatch {
    fn matches(self, endpoint: &str) -> bool {
        match self {
            PathMatch::Exact(path) => endpoint == path,
            PathMatch::Contains(fragment) => endpoint.contains(fragment),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum SchemaRule {
    /// Body is `{}`.
    EmptyObject,
    /// Body is an object containing the field.
    HasField(&'static str),
    /// Body is an object whose field holds a list.
    ListField(&'static str),
    /// All fields present on the body, or on its first element when the
    /// body is a list. An empty list passes.
    RequiredFields(&'static [&'static str]),
    /// Body is a list and each of its first `first` elements carries the field.
    EachHasField { field: &'static str, first: usize },
}

struct SchemaEntry {
    exchange: &'static str,
    path: PathMatch,
    rule: SchemaRule,
}

const SCHEMA_RULES: &[SchemaEntry] = &[
    SchemaEntry { exchange: "binance", path: PathMatch::Exact("/api/v3/ping"), rule: SchemaRule::EmptyObject },
    SchemaEntry {
        exchange: "binance",
        path: PathMatch::Exact("/api/v3/time"),
        rule: SchemaRule::HasField("serverTime"),
    },
    SchemaEntry {
        exchange: "binance",
        path: PathMatch::Exact("/api/v3/exchangeInfo"),
        rule: SchemaRule::ListField("symbols"),
    },
    SchemaEntry {
        exchange: "binance",
        path: PathMatch::Contains("ticker"),
        rule: SchemaRule::RequiredFields(&["symbol", "price", "volume"]),
    },
    SchemaEntry {
        exchange: "upbit",
        path: PathMatch::Exact("/v1/market/all"),
        rule: SchemaRule::EachHasField { field: "market", first: 5 },
    },
    SchemaEntry {
        exchange: "upbit",
        path: PathMatch::Contains("ticker"),
        rule: SchemaRule::RequiredFields(&["market", "trade_price", "acc_trade_volume_24h"]),
    },
];

/// Raised when the body doesn't have the shape a rule can inspect at all.
#[derive(Debug)]
struct ShapeMismatch(&'static str);

fn has_all(value: &Value, fields: &[&str]) -> Result<bool, ShapeMismatch> {
    let object = value.as_object().ok_or(ShapeMismatch("expected an object"))?;
    Ok(fields.iter().all(|field| object.contains_key(*field)))
}

fn check(rule: SchemaRule, body: &Value) -> Result<bool, ShapeMismatch> {
    match rule {
        SchemaRule::EmptyObject => Ok(body.as_object().is_some_and(|o| o.is_empty())),
        SchemaRule::HasField(field) => Ok(body.get(field).is_some()),
        SchemaRule::ListField(field) => Ok(body.get(field).is_some_and(Value::is_array)),
        SchemaRule::RequiredFields(fields) => match body {
            Value::Array(items) => match items.first() {
                Some(first) => has_all(first, fields),
                None => Ok(true),
            },
            other => has_all(other, fields),
        },
        SchemaRule::EachHasField { field, first } => match body {
            Value::Array(items) => {
                for item in items.iter().take(first) {
                    if !has_all(item, &[field])? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            _ => Ok(false),
        },
    }
}

/// Validates a parsed body against the rule registered for this exchange
/// and endpoint. Endpoints without a rule pass.
pub fn validate_response_schema(exchange: &str, endpoint: &str, body: &Value) -> SchemaValidation {
    let Some(entry) = SCHEMA_RULES
        .iter()
        .find(|entry| entry.exchange == exchange && entry.path.matches(endpoint))
    else {
        return SchemaValidation::Pass;
    };

    match check(entry.rule, body) {
        Ok(true) => SchemaValidation::Pass,
        Ok(false) => SchemaValidation::Fail,
        Err(ShapeMismatch(reason)) => {
            debug!(exchange, endpoint, reason, "schema check could not inspect body");
            SchemaValidation::Fail
        }
    }
}
