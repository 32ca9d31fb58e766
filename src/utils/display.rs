//! Console summary of a finished run

use tracing::{error, info, warn};
use crate::types::{OverallStatus, RunReport};

pub fn print_run_summary(report: &RunReport) {
    let summary = &report.summary;

    info!("");
    info!("{}", "=".repeat(50));
    info!("EXCHANGE COMPATIBILITY TEST SUMMARY ({})", report.test_run_id);
    info!("{}", "=".repeat(50));
    info!("Exchanges tested: {}", summary.total_exchanges_tested);
    info!("Healthy: {}", summary.exchanges_healthy);
    info!("Degraded: {}", summary.exchanges_degraded);
    info!("Critical: {}", summary.exchanges_critical);
    info!("Total issues: {}", summary.total_issues_found);
    info!("Total warnings: {}", summary.total_warnings);

    for verdict in &report.exchange_results {
        let line = format!(
            "   {:<10} {:<9} rest={} latency={:?} stream={:?} rate_limit={:?}",
            verdict.exchange,
            verdict.overall_status,
            verdict.rest_api_tests.len(),
            verdict.latency_tests.status,
            verdict.websocket_tests.status,
            verdict.rate_limit_tests.status,
        );
        match verdict.overall_status {
            OverallStatus::Critical => error!("{}", line),
            OverallStatus::Degraded | OverallStatus::Warning => warn!("{}", line),
            _ => info!("{}", line),
        }
    }

    if !report.recommendations.is_empty() {
        warn!("RECOMMENDATIONS:");
        for recommendation in &report.recommendations {
            warn!("- {}", recommendation);
        }
    }
    if !report.action_items.is_empty() {
        warn!("ACTION ITEMS:");
        for item in &report.action_items {
            warn!("- {}", item);
        }
    }
}
