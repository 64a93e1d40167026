//! JSON dump of the full enriched payload.

use crate::render::ReportFile;
use flowlog_core::LogReport;
use flowlog_error::{FlowlogResult, ReportError, ReportErrorKind};

/// File name of the JSON dump.
pub(crate) const JSON_FILE: &str = "workflow_logs.json";

pub(crate) fn render(report: &LogReport) -> FlowlogResult<Vec<ReportFile>> {
    let text = serde_json::to_string_pretty(report)
        .map_err(|e| ReportError::new(ReportErrorKind::Serialize(e.to_string())))?;
    Ok(vec![ReportFile::new(JSON_FILE, text.into_bytes())])
}
