//! Listing filter parameters.

use crate::WorkflowStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filter parameters for the logs-listing endpoint.
///
/// All fields are optional; an empty filter lists everything.
///
/// # Examples
///
/// ```
/// use flowlog_core::{LogFilter, WorkflowStatus};
///
/// let filter = LogFilter::builder()
///     .keyword("timeout")
///     .status(WorkflowStatus::Failed)
///     .build();
/// assert_eq!(filter.keyword().as_deref(), Some("timeout"));
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_getters::Getters,
)]
pub struct LogFilter {
    /// Keyword matched against inputs, outputs, session and run ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    keyword: Option<String>,
    /// Execution status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<WorkflowStatus>,
    /// Lower creation-time bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at_after: Option<DateTime<Utc>>,
    /// Upper creation-time bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at_before: Option<DateTime<Utc>>,
    /// End-user session id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_by_end_user_session_id: Option<String>,
    /// Account email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_by_account: Option<String>,
}

impl LogFilter {
    /// Creates a new filter builder.
    pub fn builder() -> LogFilterBuilder {
        LogFilterBuilder::default()
    }
}

/// Builder for [`LogFilter`].
#[derive(Debug, Default)]
pub struct LogFilterBuilder {
    keyword: Option<String>,
    status: Option<WorkflowStatus>,
    created_at_after: Option<DateTime<Utc>>,
    created_at_before: Option<DateTime<Utc>>,
    created_by_end_user_session_id: Option<String>,
    created_by_account: Option<String>,
}

impl LogFilterBuilder {
    /// Sets the search keyword.
    pub fn keyword(mut self, value: impl Into<String>) -> Self {
        self.keyword = Some(value.into());
        self
    }

    /// Sets the execution status.
    pub fn status(mut self, value: WorkflowStatus) -> Self {
        self.status = Some(value);
        self
    }

    /// Sets the lower creation-time bound.
    pub fn created_at_after(mut self, value: DateTime<Utc>) -> Self {
        self.created_at_after = Some(value);
        self
    }

    /// Sets the upper creation-time bound.
    pub fn created_at_before(mut self, value: DateTime<Utc>) -> Self {
        self.created_at_before = Some(value);
        self
    }

    /// Sets the end-user session id.
    pub fn end_user_session_id(mut self, value: impl Into<String>) -> Self {
        self.created_by_end_user_session_id = Some(value.into());
        self
    }

    /// Sets the account email.
    pub fn account(mut self, value: impl Into<String>) -> Self {
        self.created_by_account = Some(value.into());
        self
    }

    /// Builds the `LogFilter`.
    pub fn build(self) -> LogFilter {
        LogFilter {
            keyword: self.keyword,
            status: self.status,
            created_at_after: self.created_at_after,
            created_at_before: self.created_at_before,
            created_by_end_user_session_id: self.created_by_end_user_session_id,
            created_by_account: self.created_by_account,
        }
    }
}
