//! Paginated log retrieval and per-run detail fetches.

use crate::retry::with_retry;
use crate::session::{BearerSession, ConsoleSession};
use chrono::SecondsFormat;
use flowlog_core::{LogFilter, LogPage, LogRecord, NodeExecution, WorkflowRunDetail};
use flowlog_error::{ApiError, ApiErrorKind, FlowlogResult};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

#[derive(Debug, Deserialize)]
struct NodeExecutionsPayload {
    #[serde(default)]
    data: Vec<NodeExecution>,
}

/// Client for the workflow platform's log and console APIs.
///
/// Owns both bearer sessions exclusively; a pipeline run constructs one
/// client and never shares it.
#[derive(Debug, Clone)]
pub struct WorkflowLogClient {
    base_url: String,
    app: BearerSession,
    console: ConsoleSession,
}

impl WorkflowLogClient {
    /// Creates a client for `base_url` authenticated with the application
    /// API token. Console access starts unconfigured.
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> FlowlogResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let app = BearerSession::new(api_token)?;
        let console = ConsoleSession::new(base_url.clone(), None, None, None)?;
        Ok(Self {
            base_url,
            app,
            console,
        })
    }

    /// Installs an explicit console API token.
    pub fn with_console_token(mut self, token: impl Into<String>) -> FlowlogResult<Self> {
        self.console = ConsoleSession::new(self.base_url.clone(), Some(token.into()), None, None)?;
        Ok(self)
    }

    /// Installs console login credentials for lazy token minting.
    pub fn with_console_credentials(
        mut self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> FlowlogResult<Self> {
        self.console = ConsoleSession::new(
            self.base_url.clone(),
            None,
            Some(email.into()),
            Some(password.into()),
        )?;
        Ok(self)
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether any console access (token or credentials) is configured.
    pub fn has_console_access(&self) -> bool {
        self.console.is_configured()
    }

    fn listing_query(filter: &LogFilter, page: u64, limit: u64) -> Vec<(&'static str, String)> {
        let mut query = vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some(keyword) = filter.keyword() {
            query.push(("keyword", keyword.clone()));
        }
        if let Some(status) = filter.status() {
            query.push(("status", status.to_string()));
        }
        if let Some(before) = filter.created_at_before() {
            query.push((
                "created_at__before",
                before.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        if let Some(after) = filter.created_at_after() {
            query.push((
                "created_at__after",
                after.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        if let Some(session_id) = filter.created_by_end_user_session_id() {
            query.push(("created_by_end_user_session_id", session_id.clone()));
        }
        if let Some(account) = filter.created_by_account() {
            query.push(("created_by_account", account.clone()));
        }
        query
    }

    async fn fetch_page_once(&self, query: &[(&str, String)]) -> Result<LogPage, ApiError> {
        let url = format!("{}/v1/workflows/logs", self.base_url);
        let response = self.app.get(&url, query).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::new(ApiErrorKind::Status {
                status: status.as_u16(),
                body,
            }));
        }

        response.json::<LogPage>().await.map_err(|e| {
            ApiError::new(ApiErrorKind::Decode(format!(
                "failed to parse log page: {}",
                e
            )))
        })
    }

    /// Fetches one page of workflow logs.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] after retries are exhausted for transport
    /// failures and non-2xx responses.
    #[instrument(skip(self, filter))]
    pub async fn fetch_page(
        &self,
        filter: &LogFilter,
        page: u64,
        limit: u64,
    ) -> FlowlogResult<LogPage> {
        let query = Self::listing_query(filter, page, limit);
        let result = with_retry(|| self.fetch_page_once(&query)).await?;
        debug!(
            total = result.total,
            count = result.data.len(),
            has_more = result.has_more,
            "fetched log page"
        );
        Ok(result)
    }

    /// Fetches every page of workflow logs, walking from page 1.
    ///
    /// Stops when a page returns no records, when the server reports no
    /// further pages, or when `max_pages` is reached. Records are returned
    /// in server order with no deduplication.
    #[instrument(skip(self, filter))]
    pub async fn fetch_all(
        &self,
        filter: &LogFilter,
        limit: u64,
        max_pages: Option<u64>,
    ) -> FlowlogResult<Vec<LogRecord>> {
        let mut all = Vec::new();
        let mut page = 1u64;

        loop {
            if let Some(max) = max_pages {
                if page > max {
                    break;
                }
            }

            let result = self.fetch_page(filter, page, limit).await?;
            if result.data.is_empty() {
                break;
            }

            let has_more = result.has_more;
            all.extend(result.data);

            if !has_more {
                break;
            }
            page += 1;
        }

        debug!(count = all.len(), pages = page, "finished page walk");
        Ok(all)
    }

    async fn fetch_run_detail_once(
        &self,
        run_id: &str,
    ) -> Result<Option<WorkflowRunDetail>, ApiError> {
        let url = format!("{}/v1/workflows/run/{}", self.base_url, run_id);
        let response = self.app.get(&url, &[]).await?;

        let status = response.status();
        if status.as_u16() == 404 {
            // Absence of detail is a valid state, not an error.
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::new(ApiErrorKind::Status {
                status: status.as_u16(),
                body,
            }));
        }

        response
            .json::<WorkflowRunDetail>()
            .await
            .map(Some)
            .map_err(|e| {
                ApiError::new(ApiErrorKind::Decode(format!(
                    "failed to parse run detail: {}",
                    e
                )))
            })
    }

    /// Fetches extended detail for one workflow run.
    ///
    /// A 404 yields `Ok(None)`; other failures surface after retries.
    #[instrument(skip(self))]
    pub async fn fetch_run_detail(&self, run_id: &str) -> FlowlogResult<Option<WorkflowRunDetail>> {
        Ok(with_retry(|| self.fetch_run_detail_once(run_id)).await?)
    }

    /// Fetches node executions for one run through the console API.
    ///
    /// Best-effort: establishes the console session lazily, re-authenticates
    /// exactly once on a 401, and degrades to an empty list on every failure
    /// path. Never raises.
    #[instrument(skip(self))]
    pub async fn fetch_node_executions(
        &mut self,
        app_id: &str,
        run_id: &str,
    ) -> Vec<NodeExecution> {
        if !self.console.ensure().await {
            warn!("no usable console session, skipping node executions");
            return Vec::new();
        }

        let url = format!(
            "{}/console/api/apps/{}/workflow-runs/{}/node-executions",
            self.base_url, app_id, run_id
        );

        let response = match self.console.get(&url).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "node-execution fetch failed");
                return Vec::new();
            }
        };

        let response = match response.status().as_u16() {
            404 => return Vec::new(),
            401 => {
                if !self.console.handle_auth_error().await {
                    return Vec::new();
                }
                match self.console.get(&url).await {
                    Ok(retried) if retried.status().as_u16() == 401 => return Vec::new(),
                    Ok(retried) => retried,
                    Err(e) => {
                        warn!(error = %e, "node-execution fetch failed after re-login");
                        return Vec::new();
                    }
                }
            }
            _ => response,
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "node-execution fetch rejected");
            return Vec::new();
        }

        match response.json::<NodeExecutionsPayload>().await {
            Ok(payload) => payload.data,
            Err(e) => {
                warn!(error = %e, "failed to parse node executions");
                Vec::new()
            }
        }
    }
}
