//! Report serialization to CSV, Markdown and JSON.

mod csv;
mod json;
mod markdown;

use flowlog_core::LogReport;
use flowlog_error::FlowlogResult;
use serde::{Deserialize, Serialize};

/// Output format for a pipeline run.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Four CSV files with fixed headers
    #[default]
    Csv,
    /// A single Markdown report
    Markdown,
    /// A single JSON dump of the enriched payload
    Json,
}

/// One rendered report file, ready for a sink.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFile {
    /// File name relative to the output directory
    pub name: String,
    /// Rendered content
    pub bytes: Vec<u8>,
}

impl ReportFile {
    pub(crate) fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Renders the enriched payload in the requested format.
///
/// # Errors
///
/// Returns a `ReportError` when serialization fails.
pub fn render(report: &LogReport, format: OutputFormat) -> FlowlogResult<Vec<ReportFile>> {
    match format {
        OutputFormat::Csv => csv::render(report),
        OutputFormat::Markdown => markdown::render(report),
        OutputFormat::Json => json::render(report),
    }
}
