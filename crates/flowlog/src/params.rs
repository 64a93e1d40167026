//! The inbound parameter bundle and its resolution.

use chrono::{DateTime, Utc};
use flowlog_core::{LogFilter, WorkflowStatus};
use flowlog_error::{ConfigError, FlowlogResult};
use flowlog_report::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default page size for the listing endpoint.
pub(crate) const DEFAULT_LIMIT: u64 = 20;

/// The parameter bundle the pipeline accepts, whatever supplies it —
/// CLI flags, a scheduler, or a named configuration profile.
///
/// All fields are optional so a profile can fill gaps; explicit values
/// always win over profile values (see [`PipelineParams::merge_profile`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    /// Platform base URL (required after resolution)
    pub base_url: Option<String>,
    /// Application API token (required after resolution)
    pub api_token: Option<String>,
    /// Default application id for node-execution lookups
    pub app_id: Option<String>,
    /// Explicit console API token
    pub console_token: Option<String>,
    /// Console login email
    pub console_email: Option<String>,
    /// Console login password
    pub console_password: Option<String>,
    /// Listing keyword filter
    pub keyword: Option<String>,
    /// Listing status filter
    pub status: Option<WorkflowStatus>,
    /// Listing lower creation-time bound
    pub created_at_after: Option<DateTime<Utc>>,
    /// Listing upper creation-time bound
    pub created_at_before: Option<DateTime<Utc>>,
    /// Listing end-user session id filter
    pub end_user_session_id: Option<String>,
    /// Listing account email filter
    pub account_email: Option<String>,
    /// Page to fetch when not walking all pages (default 1)
    pub page: Option<u64>,
    /// Walk every page instead of fetching one
    pub fetch_all: bool,
    /// Page size, 1..=100 (default 20)
    pub limit: Option<u64>,
    /// Page-walk ceiling for `fetch_all`
    pub max_pages: Option<u64>,
    /// Fetch run detail per record
    pub with_details: bool,
    /// Fetch node executions per record (needs console access)
    pub with_node_executions: bool,
    /// Invoke the notifier once the reports are written
    pub notify_on_complete: bool,
    /// Report output format (default csv)
    pub output_format: Option<OutputFormat>,
    /// Report output directory (default current directory)
    pub output_dir: Option<PathBuf>,
}

impl PipelineParams {
    /// Fills every unset field from `profile`. Explicit values win; boolean
    /// switches combine with OR since an unset CLI flag reads as `false`.
    pub fn merge_profile(mut self, profile: &PipelineParams) -> Self {
        macro_rules! fill {
            ($($field:ident),* $(,)?) => {
                $(
                    if self.$field.is_none() {
                        self.$field = profile.$field.clone();
                    }
                )*
            };
        }
        fill!(
            base_url,
            api_token,
            app_id,
            console_token,
            console_email,
            console_password,
            keyword,
            status,
            created_at_after,
            created_at_before,
            end_user_session_id,
            account_email,
            page,
            limit,
            max_pages,
            output_format,
            output_dir,
        );
        self.fetch_all |= profile.fetch_all;
        self.with_details |= profile.with_details;
        self.with_node_executions |= profile.with_node_executions;
        self.notify_on_complete |= profile.notify_on_complete;
        self
    }

    /// Validates the bundle and applies defaults, failing fast before any
    /// network call.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when `base_url`/`api_token` are missing, the
    /// limit is outside 1..=100, the page is zero, or node executions are
    /// requested without any console credential.
    pub fn resolve(self) -> FlowlogResult<ResolvedParams> {
        let base_url = self
            .base_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ConfigError::new("base_url is required"))?;
        let api_token = self
            .api_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ConfigError::new("api_token is required"))?;

        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=100).contains(&limit) {
            return Err(ConfigError::new(format!(
                "limit must be between 1 and 100, got {}",
                limit
            ))
            .into());
        }

        let page = self.page.unwrap_or(1);
        if page == 0 {
            return Err(ConfigError::new("page must be at least 1").into());
        }

        let has_console_credentials =
            self.console_email.is_some() && self.console_password.is_some();
        if self.with_node_executions && self.console_token.is_none() && !has_console_credentials {
            return Err(ConfigError::new(
                "node executions require console_token or console_email + console_password",
            )
            .into());
        }

        Ok(ResolvedParams {
            base_url,
            api_token,
            app_id: self.app_id,
            console_token: self.console_token,
            console_email: self.console_email,
            console_password: self.console_password,
            keyword: self.keyword,
            status: self.status,
            created_at_after: self.created_at_after,
            created_at_before: self.created_at_before,
            end_user_session_id: self.end_user_session_id,
            account_email: self.account_email,
            page,
            fetch_all: self.fetch_all,
            limit,
            max_pages: self.max_pages,
            with_details: self.with_details,
            with_node_executions: self.with_node_executions,
            notify_on_complete: self.notify_on_complete,
            output_format: self.output_format.unwrap_or_default(),
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}

/// The validated bundle the pipeline actually runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParams {
    /// Platform base URL
    pub base_url: String,
    /// Application API token
    pub api_token: String,
    /// Default application id for node-execution lookups
    pub app_id: Option<String>,
    /// Explicit console API token
    pub console_token: Option<String>,
    /// Console login email
    pub console_email: Option<String>,
    /// Console login password
    pub console_password: Option<String>,
    /// Listing keyword filter
    pub keyword: Option<String>,
    /// Listing status filter
    pub status: Option<WorkflowStatus>,
    /// Listing lower creation-time bound
    pub created_at_after: Option<DateTime<Utc>>,
    /// Listing upper creation-time bound
    pub created_at_before: Option<DateTime<Utc>>,
    /// Listing end-user session id filter
    pub end_user_session_id: Option<String>,
    /// Listing account email filter
    pub account_email: Option<String>,
    /// Page to fetch when not walking all pages
    pub page: u64,
    /// Walk every page instead of fetching one
    pub fetch_all: bool,
    /// Page size
    pub limit: u64,
    /// Page-walk ceiling for `fetch_all`
    pub max_pages: Option<u64>,
    /// Fetch run detail per record
    pub with_details: bool,
    /// Fetch node executions per record
    pub with_node_executions: bool,
    /// Invoke the notifier once the reports are written
    pub notify_on_complete: bool,
    /// Report output format
    pub output_format: OutputFormat,
    /// Report output directory
    pub output_dir: PathBuf,
}

impl ResolvedParams {
    /// The listing filter these parameters describe.
    pub fn filter(&self) -> LogFilter {
        let mut builder = LogFilter::builder();
        if let Some(keyword) = &self.keyword {
            builder = builder.keyword(keyword);
        }
        if let Some(status) = self.status {
            builder = builder.status(status);
        }
        if let Some(after) = self.created_at_after {
            builder = builder.created_at_after(after);
        }
        if let Some(before) = self.created_at_before {
            builder = builder.created_at_before(before);
        }
        if let Some(session_id) = &self.end_user_session_id {
            builder = builder.end_user_session_id(session_id);
        }
        if let Some(account) = &self.account_email {
            builder = builder.account(account);
        }
        builder.build()
    }
}
