//! Workflow run status filter values.

use serde::{Deserialize, Serialize};

/// Execution status accepted by the logs-listing filter.
///
/// # Examples
///
/// ```
/// use flowlog_core::WorkflowStatus;
/// use std::str::FromStr;
///
/// let status = WorkflowStatus::from_str("partial-succeeded").unwrap();
/// assert_eq!(status.to_string(), "partial-succeeded");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum WorkflowStatus {
    /// Run completed successfully
    Succeeded,
    /// Run failed
    Failed,
    /// Run was stopped before completion
    Stopped,
    /// Run completed with node-level exceptions
    PartialSucceeded,
}
