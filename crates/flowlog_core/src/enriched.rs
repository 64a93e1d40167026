//! Per-record enrichment results.

use crate::{LogRecord, NodeExecution, WorkflowRunDetail};
use serde::{Deserialize, Serialize};

/// A log record together with its best-effort enrichment.
///
/// Every failure during enrichment is scoped to its own record: the detail
/// and node-execution fetches each annotate their own error field instead of
/// propagating, so a partially-failed batch still yields a full report.
///
/// The base record is flattened into the serialized form, so the JSON dump
/// reads like the platform payload plus enrichment keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EnrichedLog {
    /// The base log record
    #[serde(flatten)]
    pub record: LogRecord,
    /// Run detail, when fetched successfully
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_run_detail: Option<WorkflowRunDetail>,
    /// Node executions, when fetched successfully
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_executions: Option<Vec<NodeExecution>>,
    /// Failure description from the run-detail fetch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_run_detail_error: Option<String>,
    /// Failure description from the node-execution fetch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_executions_error: Option<String>,
    /// Failure description from the batch enrichment layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichment_error: Option<String>,
}

impl From<LogRecord> for EnrichedLog {
    fn from(record: LogRecord) -> Self {
        Self {
            record,
            ..Self::default()
        }
    }
}

impl EnrichedLog {
    /// Node executions as a slice, empty when none were fetched.
    pub fn nodes(&self) -> &[NodeExecution] {
        self.node_executions.as_deref().unwrap_or_default()
    }
}

/// The full result payload handed to the report layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LogReport {
    /// Total matching records on the server
    #[serde(default)]
    pub total: u64,
    /// 1-based page number for single-page retrievals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    /// Page size for single-page retrievals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Whether further pages exist on the server
    #[serde(default)]
    pub has_more: bool,
    /// The enriched records
    #[serde(default)]
    pub data: Vec<EnrichedLog>,
}
