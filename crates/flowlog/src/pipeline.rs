//! The pipeline orchestrator: retrieval, enrichment, reports, notification.

use crate::notify::{LogNotifier, Notifier};
use crate::params::{PipelineParams, ResolvedParams};
use flowlog_client::WorkflowLogClient;
use flowlog_core::{EnrichedLog, LogReport};
use flowlog_error::FlowlogResult;
use flowlog_report::{render, FilesystemSink, OutputFormat, ReportSink};
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// What a finished run produced.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// The enriched payload the reports were derived from
    pub report: LogReport,
    /// Report files, in write order
    pub written: Vec<PathBuf>,
    /// Format the reports were rendered in
    pub format: OutputFormat,
}

/// One pipeline run: retrieval → enrichment → report generation →
/// notification.
///
/// Construction validates the parameter bundle and fails fast; no network
/// call happens before [`Pipeline::run`]. Each run owns its own client and
/// sessions — nothing is shared across concurrent runs.
#[derive(Debug)]
pub struct Pipeline {
    params: ResolvedParams,
}

impl Pipeline {
    /// Validates `params` (after profile merging) into a runnable pipeline.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for a bundle that could never run; see
    /// [`PipelineParams::resolve`].
    pub fn new(params: PipelineParams) -> FlowlogResult<Self> {
        Ok(Self {
            params: params.resolve()?,
        })
    }

    /// The validated parameters this pipeline will run with.
    pub fn params(&self) -> &ResolvedParams {
        &self.params
    }

    fn build_client(&self) -> FlowlogResult<WorkflowLogClient> {
        let client = WorkflowLogClient::new(&self.params.base_url, &self.params.api_token)?;
        if let Some(token) = &self.params.console_token {
            return client.with_console_token(token);
        }
        if let (Some(email), Some(password)) =
            (&self.params.console_email, &self.params.console_password)
        {
            return client.with_console_credentials(email, password);
        }
        Ok(client)
    }

    /// Runs the pipeline with a filesystem sink in `output_dir` and the
    /// logging notifier.
    pub async fn run(&self) -> FlowlogResult<PipelineOutcome> {
        let sink = FilesystemSink::new(&self.params.output_dir)?;
        self.run_with(&sink, &LogNotifier).await
    }

    /// Runs the pipeline against explicit sink and notifier collaborators.
    ///
    /// A listing failure is fatal and surfaces here; enrichment failures are
    /// absorbed into per-record error fields, so partial reports are still
    /// produced.
    #[instrument(skip_all, fields(fetch_all = self.params.fetch_all, format = %self.params.output_format))]
    pub async fn run_with(
        &self,
        sink: &dyn ReportSink,
        notifier: &dyn Notifier,
    ) -> FlowlogResult<PipelineOutcome> {
        let mut client = self.build_client()?;
        let filter = self.params.filter();

        let (records, mut report) = if self.params.fetch_all {
            info!("fetching all pages");
            let records = client
                .fetch_all(&filter, self.params.limit, self.params.max_pages)
                .await?;
            let report = LogReport {
                total: records.len() as u64,
                page: None,
                limit: None,
                has_more: false,
                data: Vec::new(),
            };
            (records, report)
        } else {
            info!(page = self.params.page, "fetching one page");
            let page = client
                .fetch_page(&filter, self.params.page, self.params.limit)
                .await?;
            let report = LogReport {
                total: page.total,
                page: Some(page.page),
                limit: Some(page.limit),
                has_more: page.has_more,
                data: Vec::new(),
            };
            (page.data, report)
        };

        // CSV derivation reads run details, so enrichment is implied there.
        let needs_enrichment = self.params.with_details
            || self.params.with_node_executions
            || self.params.output_format == OutputFormat::Csv;

        report.data = if needs_enrichment {
            info!(count = records.len(), "enriching records");
            client
                .enrich_all(
                    records,
                    self.params.app_id.as_deref(),
                    self.params.with_node_executions,
                )
                .await
        } else {
            records.into_iter().map(EnrichedLog::from).collect()
        };

        let files = render(&report, self.params.output_format)?;
        let mut written = Vec::with_capacity(files.len());
        for file in files {
            written.push(sink.put(&file.name, &file.bytes)?);
        }

        info!(
            records = report.data.len(),
            files = written.len(),
            "pipeline run complete"
        );

        if self.params.notify_on_complete {
            if let Err(e) = notifier.notify(self.params.output_format, &written).await {
                warn!(error = %e, "completion notification failed");
            }
        }

        Ok(PipelineOutcome {
            report,
            written,
            format: self.params.output_format,
        })
    }
}
