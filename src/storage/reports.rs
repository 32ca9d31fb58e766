//! Run report storage

use std::fs;
use std::path::Path;
use tracing::info;
use crate::{
    errors::{CompatError, CompatResult},
    types::RunReport,
};

pub fn save_report(report: &RunReport, path: impl AsRef<Path>) -> CompatResult<()> {
    let path = path.as_ref();
    let to_report_error = |source: anyhow::Error| CompatError::Report {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| to_report_error(e.into()))?;
    }

    let json = serde_json::to_string_pretty(report).map_err(|e| to_report_error(e.into()))?;
    fs::write(path, json).map_err(|e| to_report_error(e.into()))?;

    info!(
        test_run_id = %report.test_run_id,
        path = %path.display(),
        "Report saved"
    );

    Ok(())
}
