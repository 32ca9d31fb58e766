//! Exchange verdict and run report types

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use super::{EndpointResult, LatencyResult, OverallStatus, RateLimitResult, StreamResult};

#[derive(Debug, Clone, Serialize)]
pub struct ExchangeVerdict {
    pub exchange: String,
    pub timestamp: DateTime<Utc>,
    pub rest_api_tests: Vec<EndpointResult>,
    pub websocket_tests: StreamResult,
    pub latency_tests: LatencyResult,
    pub rate_limit_tests: RateLimitResult,
    pub overall_status: OverallStatus,
    pub issues_found: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total_exchanges_tested: usize,
    pub exchanges_healthy: usize,
    pub exchanges_degraded: usize,
    pub exchanges_critical: usize,
    pub total_issues_found: usize,
    pub total_warnings: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub test_run_id: String,
    pub timestamp: DateTime<Utc>,
    pub summary: ReportSummary,
    /// Verdicts in configuration order, written as an object keyed by exchange id.
    #[serde(serialize_with = "keyed_by_exchange")]
    pub exchange_results: Vec<ExchangeVerdict>,
    pub recommendations: Vec<String>,
    pub action_items: Vec<String>,
}

fn keyed_by_exchange<S: Serializer>(verdicts: &[ExchangeVerdict], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(verdicts.iter().map(|verdict| (&verdict.exchange, verdict)))
}

impl RunReport {
    pub fn verdict(&self, exchange: &str) -> Option<&ExchangeVerdict> {
        self.exchange_results.iter().find(|verdict| verdict.exchange == exchange)
    }

    /// 1 if any exchange is critical, 2 if any is degraded, otherwise 0.
    /// Exit code 3 is reserved for runs that never produced a report.
    pub fn exit_code(&self) -> u8 {
        if self.summary.exchanges_critical > 0 {
            1
        } else if self.summary.exchanges_degraded > 0 {
            2
        } else {
            0
        }
    }
}
