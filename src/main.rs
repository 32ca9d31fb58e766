//! Exchange Compatibility Probe - Main Entry Point
//!
//! Runs once per invocation; scheduling is left to cron or a daemon.
//! Exit codes: 0 all healthy, 1 critical exchange, 2 degraded exchange,
//! 3 the run itself failed.

use anyhow::{Context, Result};
use exchange_compat_probe::*;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

const RUN_FAILED: u8 = 3;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let config = CONFIG.clone();

    // Initialize logging
    let _logging_guard = match utils::setup_logging(&config.log_dir) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {:#}", e);
            return ExitCode::from(RUN_FAILED);
        }
    };

    match run(&config).await {
        Ok(report) => {
            utils::print_run_summary(&report);
            ExitCode::from(report.exit_code())
        }
        Err(e) => {
            error!("Test execution failed: {:#}", e);
            ExitCode::from(RUN_FAILED)
        }
    }
}

async fn run(settings: &Config) -> Result<RunReport> {
    let exchanges = match &settings.exchanges_file {
        Some(path) => config::load_exchanges_file(path)?,
        None => config::default_exchanges(),
    };
    let exchanges = config::select_exchanges(exchanges, settings.exchange_filter.as_deref());
    if exchanges.is_empty() {
        anyhow::bail!("No exchanges selected for testing");
    }

    info!("📋 Configuration:");
    info!("   Exchanges: {}", exchanges.iter().map(|e| e.id.as_str()).collect::<Vec<_>>().join(", "));
    info!("   Request timeout: {:?}", settings.timings.request_timeout);
    info!("   Run deadline: {:?}", settings.run_deadline);
    info!("   Report file: {}", settings.report_file);

    let fetcher = Arc::new(network::ReqwestFetcher::new(settings.timings.request_timeout)?);
    let report = run_all(&exchanges, fetcher, settings.timings.clone(), settings.run_deadline).await;

    storage::save_report(&report, &settings.report_file)
        .with_context(|| format!("could not persist report {}", report.test_run_id))?;

    Ok(report)
}
