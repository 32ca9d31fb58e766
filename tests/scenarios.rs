//! End-to-end runs through the orchestrator and aggregator

mod common;

use common::{binance_like, healthy_binance_body, ScriptedFetcher, Step};
use exchange_compat_probe::{
    config::ProbeTimings,
    evaluation::{run_all, DEADLINE_REASON, URGENT_RECOMMENDATION},
    types::{EndpointStatus, LatencyStatus, OverallStatus, RateLimitStatus, StreamStatus},
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_tungstenite::{accept_async, tungstenite::Message};

/// Pushes a ticker frame every 50ms to each client until it disconnects.
async fn ticker_stream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let Ok(mut ws) = accept_async(socket).await else { return };
                loop {
                    let frame = Message::Text(r#"{"e":"24hrTicker","s":"BTCUSDT","c":"65000.00"}"#.into());
                    if ws.send(frame).await.is_err() {
                        return;
                    }
                    tokio::time::sleep(Duration::from_millis(50)).await;
                }
            });
        }
    });
    format!("ws://{}", addr)
}

fn quick_timings() -> ProbeTimings {
    ProbeTimings {
        endpoint_pacing: Duration::from_millis(1),
        stream_window: Duration::from_millis(500),
        stream_poll: Duration::from_millis(100),
        latency_pacing: Duration::from_millis(1),
        burst_pacing: Duration::from_millis(1),
        ..ProbeTimings::default()
    }
}

#[tokio::test]
async fn healthy_exchange_needs_no_attention() {
    let ws_url = ticker_stream().await;
    let exchange = binance_like(Some(ws_url));
    let fetcher = Arc::new(ScriptedFetcher::new(|url, _| {
        Step::json(healthy_binance_body(url)).delayed(Duration::from_millis(50))
    }));

    let report = run_all(&[exchange], fetcher, quick_timings(), Duration::from_secs(120)).await;

    let verdict = report.verdict("binance").unwrap();
    assert_eq!(verdict.overall_status, OverallStatus::Healthy);
    assert_eq!(verdict.websocket_tests.status, StreamStatus::Pass);
    assert!(verdict.latency_tests.average_latency_ms >= 50.0);
    assert_eq!(verdict.rate_limit_tests.status, RateLimitStatus::NotTriggered);
    assert!(!report.recommendations.iter().any(|r| r.contains("binance")));
    assert!(report.recommendations.is_empty());
    assert_eq!(report.summary.exchanges_healthy, 1);
    assert_eq!(report.exit_code(), 0);
}

#[tokio::test(start_paused = true)]
async fn three_server_errors_make_exchange_critical() {
    let exchange = binance_like(None);
    let fetcher = Arc::new(ScriptedFetcher::new(|url, _| {
        if url.ends_with("/exchangeInfo") || url.ends_with("/depth") || url.ends_with("/klines") {
            Step::status(500)
        } else {
            Step::json(healthy_binance_body(url))
        }
    }));

    let report = run_all(&[exchange], fetcher, ProbeTimings::default(), Duration::from_secs(900)).await;

    let verdict = report.verdict("binance").unwrap();
    let failures = verdict
        .rest_api_tests
        .iter()
        .filter(|r| r.status == EndpointStatus::Fail)
        .count();
    assert_eq!(failures, 3);
    assert_eq!(verdict.overall_status, OverallStatus::Critical);
    assert_eq!(report.summary.exchanges_critical, 1);
    assert_eq!(report.summary.total_issues_found, 3);
    assert!(report.recommendations.iter().any(|r| r == URGENT_RECOMMENDATION));
    assert_eq!(report.exit_code(), 1);
}

#[tokio::test(start_paused = true)]
async fn missing_stream_is_skipped_and_neutral() {
    let exchange = binance_like(None);
    let fetcher = Arc::new(ScriptedFetcher::new(|url, _| Step::json(healthy_binance_body(url))));

    let report = run_all(&[exchange], fetcher, ProbeTimings::default(), Duration::from_secs(900)).await;

    let verdict = report.verdict("binance").unwrap();
    assert_eq!(verdict.websocket_tests.status, StreamStatus::Skipped);
    assert!(verdict.websocket_tests.issues.is_empty());
    assert_eq!(verdict.overall_status, OverallStatus::Healthy);
    assert_eq!(report.summary.total_exchanges_tested, 1);
}

#[tokio::test(start_paused = true)]
async fn run_deadline_marks_in_flight_exchanges() {
    let exchange = binance_like(None);
    let fetcher = Arc::new(ScriptedFetcher::new(|_, _| Step::Hang));

    let report = run_all(&[exchange.clone()], fetcher, ProbeTimings::default(), Duration::from_secs(5)).await;

    let verdict = report.verdict("binance").unwrap();
    assert_eq!(verdict.rest_api_tests.len(), exchange.endpoints.len());
    assert!(verdict
        .rest_api_tests
        .iter()
        .all(|r| r.status == EndpointStatus::Error && r.issues == vec![DEADLINE_REASON]));
    assert_eq!(verdict.overall_status, OverallStatus::Critical);
    assert_eq!(report.exit_code(), 1);
}

#[tokio::test(start_paused = true)]
async fn slow_rate_limit_burst_keeps_finished_results() {
    let exchange = binance_like(None);
    // REST suite and latency samples use the first 11 pings; the burst then crawls
    let fetcher = Arc::new(ScriptedFetcher::new(|url, call| {
        let step = Step::json(healthy_binance_body(url));
        if url.ends_with("/ping") && call > 11 {
            step.delayed(Duration::from_secs(25))
        } else {
            step
        }
    }));

    let report = run_all(&[exchange], fetcher, ProbeTimings::default(), Duration::from_secs(900)).await;

    let verdict = report.verdict("binance").unwrap();
    assert!(verdict.rest_api_tests.iter().all(|r| r.status == EndpointStatus::Pass));
    assert_ne!(verdict.latency_tests.status, LatencyStatus::Fail);
    assert_eq!(verdict.latency_tests.measurements.len(), 10);
    assert_eq!(verdict.rate_limit_tests.status, RateLimitStatus::Error);
    assert_eq!(verdict.rate_limit_tests.issues, vec![DEADLINE_REASON]);
    assert!(verdict.issues_found.contains(&format!("rate_limit: {}", DEADLINE_REASON)));
    assert_eq!(verdict.overall_status, OverallStatus::Healthy);
    assert_eq!(report.summary.total_issues_found, 0);
    assert_eq!(report.exit_code(), 0);
}

#[tokio::test(start_paused = true)]
async fn deadline_mid_suite_keeps_endpoints_already_probed() {
    let exchange = binance_like(None);
    let fetcher = Arc::new(ScriptedFetcher::new(|url, _| {
        if url.ends_with("/exchangeInfo") || url.ends_with("/ticker/24hr") {
            Step::Hang
        } else {
            Step::json(healthy_binance_body(url))
        }
    }));

    // /exchangeInfo times out at ~30s; /ticker/24hr is still hanging at 45s
    let report = run_all(&[exchange.clone()], fetcher, ProbeTimings::default(), Duration::from_secs(45)).await;

    let verdict = report.verdict("binance").unwrap();
    let statuses: Vec<_> = verdict.rest_api_tests.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            EndpointStatus::Pass,
            EndpointStatus::Pass,
            EndpointStatus::Timeout,
            EndpointStatus::Error,
            EndpointStatus::Error,
            EndpointStatus::Error,
        ]
    );
    let endpoints: Vec<_> = verdict.rest_api_tests.iter().map(|r| r.endpoint.clone()).collect();
    assert_eq!(endpoints, exchange.endpoints);
    assert_eq!(verdict.rest_api_tests[2].issues, vec!["Request timeout"]);
    assert!(verdict.rest_api_tests[3..].iter().all(|r| r.issues == vec![DEADLINE_REASON]));
    assert_eq!(verdict.latency_tests.measurements.len(), 10);
    assert_eq!(verdict.rate_limit_tests.status, RateLimitStatus::Error);
    assert_eq!(verdict.overall_status, OverallStatus::Critical);
}

#[tokio::test(start_paused = true)]
async fn exchanges_are_reported_independently() {
    let healthy = binance_like(None);
    let mut broken = binance_like(None);
    broken.id = "brokenex".to_string();
    broken.base_url = "http://broken.test".to_string();

    let fetcher = Arc::new(ScriptedFetcher::new(|url, _| {
        if url.starts_with("http://broken.test") {
            Step::Transport("connection refused".into())
        } else {
            Step::json(healthy_binance_body(url))
        }
    }));

    let report = run_all(&[healthy, broken], fetcher, ProbeTimings::default(), Duration::from_secs(900)).await;

    assert_eq!(report.verdict("binance").unwrap().overall_status, OverallStatus::Healthy);
    assert_eq!(report.verdict("brokenex").unwrap().overall_status, OverallStatus::Critical);
    let s = &report.summary;
    assert_eq!(s.exchanges_healthy + s.exchanges_degraded + s.exchanges_critical, s.total_exchanges_tested);
}
