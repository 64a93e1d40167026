//! Workflow execution log entries as returned by the listing endpoint.

use serde::{Deserialize, Serialize};

/// An account identity attached to a log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AccountIdentity {
    /// Account email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// An anonymous end-user identity attached to a log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EndUserIdentity {
    /// End-user session identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// The run summary embedded in every log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WorkflowRunSummary {
    /// Workflow run identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Run status as reported by the platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Wall-clock run duration in seconds
    #[serde(default)]
    pub elapsed_time: f64,
}

/// One workflow execution log entry.
///
/// The creator fields are mutually exclusive: a record is created either by
/// a console account or by an anonymous end user, never both.
///
/// # Examples
///
/// ```
/// use flowlog_core::LogRecord;
///
/// let record: LogRecord = serde_json::from_str(
///     r#"{"id": "log-1", "created_at": 1700000000.0}"#,
/// ).unwrap();
/// assert_eq!(record.id, "log-1");
/// assert!(record.workflow_run.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LogRecord {
    /// Unique log identifier
    #[serde(default)]
    pub id: String,
    /// Creation timestamp in epoch seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<f64>,
    /// Originating channel (e.g. service-api, web-app)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_from: Option<String>,
    /// Console account that triggered the run, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_account: Option<AccountIdentity>,
    /// Anonymous end user that triggered the run, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_end_user: Option<EndUserIdentity>,
    /// Owning application id, when the platform includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// Embedded run summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_run: Option<WorkflowRunSummary>,
}

impl LogRecord {
    /// Workflow run id from the embedded summary, if present.
    pub fn workflow_run_id(&self) -> Option<&str> {
        self.workflow_run.as_ref()?.id.as_deref()
    }
}

/// One page of the logs-listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LogPage {
    /// Total matching records on the server
    #[serde(default)]
    pub total: u64,
    /// 1-based page number
    #[serde(default)]
    pub page: u64,
    /// Page size requested
    #[serde(default)]
    pub limit: u64,
    /// Whether further pages exist
    #[serde(default)]
    pub has_more: bool,
    /// Records on this page
    #[serde(default)]
    pub data: Vec<LogRecord>,
}
