//! Run-level detail fetched lazily per log record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Extended information about one workflow execution.
///
/// `inputs` and `outputs` arrive either as structured JSON or as
/// JSON-encoded strings (sometimes nested several levels deep); consumers
/// apply [`crate::decode_nested`] before reading fields out of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WorkflowRunDetail {
    /// Run identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning application id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// Run status as reported by the platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Error text for failed runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock run duration in seconds
    #[serde(default)]
    pub elapsed_time: f64,
    /// Total token consumption across the run
    #[serde(default)]
    pub total_tokens: u64,
    /// Total executed step count
    #[serde(default)]
    pub total_steps: u64,
    /// Count of node-level exceptions
    #[serde(default)]
    pub exceptions_count: u64,
    /// Creation timestamp in epoch seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<f64>,
    /// Completion timestamp in epoch seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<f64>,
    /// Run inputs, structured or JSON-encoded string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Value>,
    /// Run outputs, structured or JSON-encoded string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Value>,
}
