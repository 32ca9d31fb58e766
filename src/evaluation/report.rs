//! Run-level aggregation of exchange verdicts

use chrono::{DateTime, Utc};
use crate::types::{ExchangeVerdict, OverallStatus, ReportSummary, RunReport};

pub const URGENT_RECOMMENDATION: &str = "URGENT: Critical issues detected. Immediate investigation required.";
pub const URGENT_ACTION: &str = "Investigate critical exchange failures immediately";
pub const DEGRADED_RECOMMENDATION: &str =
    "Performance degradation detected. Monitor closely and prepare contingency plans.";
pub const DEGRADED_ACTION: &str = "Review degraded exchange performance and implement mitigations";
pub const WARNINGS_RECOMMENDATION: &str =
    "High number of warnings detected. Review and optimize exchange configurations.";

const WARNING_REVIEW_THRESHOLD: usize = 10;

/// Counts verdicts by status. Issue and warning totals only cover REST
/// endpoint results.
pub fn summarize(verdicts: &[ExchangeVerdict]) -> ReportSummary {
    let mut summary = ReportSummary {
        total_exchanges_tested: verdicts.len(),
        ..ReportSummary::default()
    };

    for verdict in verdicts {
        match verdict.overall_status {
            OverallStatus::Healthy => summary.exchanges_healthy += 1,
            OverallStatus::Degraded | OverallStatus::Warning => summary.exchanges_degraded += 1,
            OverallStatus::Critical => summary.exchanges_critical += 1,
            OverallStatus::Unknown => {}
        }

        for result in &verdict.rest_api_tests {
            summary.total_issues_found += result.issues.len();
            summary.total_warnings += result.warnings.len();
        }
    }

    summary
}

/// Recommendations and action items. The rules are additive.
pub fn recommendations_for(summary: &ReportSummary) -> (Vec<String>, Vec<String>) {
    let mut recommendations = Vec::new();
    let mut action_items = Vec::new();

    if summary.exchanges_critical > 0 {
        recommendations.push(URGENT_RECOMMENDATION.to_string());
        action_items.push(URGENT_ACTION.to_string());
    }
    if summary.exchanges_degraded > 0 {
        recommendations.push(DEGRADED_RECOMMENDATION.to_string());
        action_items.push(DEGRADED_ACTION.to_string());
    }
    if summary.total_warnings > WARNING_REVIEW_THRESHOLD {
        recommendations.push(WARNINGS_RECOMMENDATION.to_string());
    }

    (recommendations, action_items)
}

pub fn generate_report(started_at: DateTime<Utc>, verdicts: Vec<ExchangeVerdict>) -> RunReport {
    let summary = summarize(&verdicts);
    let (recommendations, action_items) = recommendations_for(&summary);

    RunReport {
        test_run_id: started_at.format("%Y%m%d_%H%M%S").to_string(),
        timestamp: Utc::now(),
        summary,
        exchange_results: verdicts,
        recommendations,
        action_items,
    }
}
