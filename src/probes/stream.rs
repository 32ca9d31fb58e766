//! Streaming connectivity probe

use futures_util::{SinkExt, StreamExt};
use tokio::time::Instant;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};
use crate::{
    config::ProbeTimings,
    types::{ExchangeConfig, StreamResult, StreamStatus},
};

#[derive(Default)]
struct Collected {
    messages_received: u64,
    message_format_valid: bool,
    issues: Vec<String>,
    warnings: Vec<String>,
}

impl Collected {
    fn record_text(&mut self, text: &str) {
        self.messages_received += 1;
        if serde_json::from_str::<serde_json::Value>(text).is_ok() {
            self.message_format_valid = true;
        } else {
            self.warnings.push("Invalid JSON message format".to_string());
        }
    }
}

/// Connects to the exchange stream and watches it for one observation
/// window. Binary frames carrying UTF-8 are treated as text, since some
/// venues push JSON that way.
pub async fn probe_stream(exchange: &ExchangeConfig, timings: &ProbeTimings) -> StreamResult {
    let Some(url) = exchange.ws_url.as_deref() else {
        return StreamResult::skipped("No WebSocket URL configured");
    };

    let started = Instant::now();
    let mut ws = match tokio::time::timeout(timings.request_timeout, connect_async(url)).await {
        Ok(Ok((ws, _response))) => ws,
        Ok(Err(e)) => {
            warn!(exchange = %exchange.id, error = %e, "stream connection failed");
            return StreamResult::errored(Some(url.to_string()), &e.to_string());
        }
        Err(_) => {
            warn!(exchange = %exchange.id, "stream connection timed out");
            return StreamResult::errored(Some(url.to_string()), "Connection timeout");
        }
    };
    let connection_time_ms = started.elapsed().as_millis() as u64;

    if let Some(subscription) = &exchange.stream_subscription {
        if let Err(e) = ws.send(Message::Text(subscription.clone().into())).await {
            return StreamResult {
                connection_time_ms,
                ..StreamResult::errored(Some(url.to_string()), &format!("Subscription failed: {}", e))
            };
        }
    }

    let mut collected = Collected::default();
    let deadline = Instant::now() + timings.stream_window;

    loop {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        let poll = timings.stream_poll.min(deadline - now);

        match tokio::time::timeout(poll, ws.next()).await {
            Err(_) => continue,
            Ok(Some(Ok(Message::Text(text)))) => collected.record_text(text.as_str()),
            Ok(Some(Ok(Message::Binary(bytes)))) => match std::str::from_utf8(&bytes) {
                Ok(text) => collected.record_text(text),
                Err(_) => debug!(exchange = %exchange.id, "ignoring non-UTF-8 binary frame"),
            },
            Ok(Some(Ok(Message::Close(frame)))) => {
                debug!(exchange = %exchange.id, ?frame, "stream closed by server");
                break;
            }
            Ok(Some(Ok(_))) => {}
            Ok(Some(Err(e))) => {
                collected.issues.push(format!("WebSocket error: {}", e));
                break;
            }
            Ok(None) => {
                debug!(exchange = %exchange.id, "stream ended");
                break;
            }
        }
    }

    let _ = tokio::time::timeout(timings.stream_poll, ws.close(None)).await;

    let status = if collected.messages_received > 0 {
        StreamStatus::Pass
    } else {
        collected.issues.push("No messages received".to_string());
        StreamStatus::Fail
    };

    info!(
        exchange = %exchange.id,
        status = ?status,
        messages = collected.messages_received,
        connection_time_ms,
        "stream probe complete"
    );

    StreamResult {
        url: Some(url.to_string()),
        status,
        reason: None,
        connection_time_ms,
        messages_received: collected.messages_received,
        message_format_valid: collected.message_format_valid,
        issues: collected.issues,
        warnings: collected.warnings,
    }
}
