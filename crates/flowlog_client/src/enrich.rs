//! Best-effort per-record enrichment.

use crate::client::WorkflowLogClient;
use flowlog_core::{EnrichedLog, LogRecord};
use tracing::{debug, instrument};

impl WorkflowLogClient {
    /// Attaches run detail and (optionally) node executions to one record.
    ///
    /// Every failure is scoped to this record: the run-detail fetch and the
    /// node-execution fetch each annotate their own error field instead of
    /// propagating. A record without a run id is returned unchanged.
    ///
    /// App id precedence for the node-execution fetch: the record's own
    /// `app_id`, else `default_app_id`, else the app id on the fetched run
    /// detail.
    #[instrument(skip(self, record), fields(log_id = %record.id))]
    pub async fn enrich(
        &mut self,
        record: LogRecord,
        default_app_id: Option<&str>,
        include_node_executions: bool,
    ) -> EnrichedLog {
        let mut enriched = EnrichedLog::from(record);

        let Some(run_id) = enriched.record.workflow_run_id().map(str::to_owned) else {
            return enriched;
        };

        match self.fetch_run_detail(&run_id).await {
            Ok(Some(detail)) => enriched.workflow_run_detail = Some(detail),
            // 404: no detail available, silently skipped.
            Ok(None) => {}
            Err(e) => enriched.workflow_run_detail_error = Some(e.to_string()),
        }

        if include_node_executions {
            let app_id = enriched
                .record
                .app_id
                .clone()
                .or_else(|| default_app_id.map(str::to_owned))
                .or_else(|| {
                    enriched
                        .workflow_run_detail
                        .as_ref()
                        .and_then(|detail| detail.app_id.clone())
                });

            match app_id {
                Some(app_id) => {
                    let nodes = self.fetch_node_executions(&app_id, &run_id).await;
                    enriched.node_executions = Some(nodes);
                }
                None => {
                    enriched.node_executions_error =
                        Some("unable to determine app_id for node executions".to_string());
                }
            }
        }

        enriched
    }

    /// Enriches a batch of records sequentially.
    ///
    /// One record at a time; a failure never aborts the batch. Failures are
    /// already absorbed per record by [`WorkflowLogClient::enrich`], so the
    /// result always has the same length and order as the input.
    pub async fn enrich_all(
        &mut self,
        records: Vec<LogRecord>,
        default_app_id: Option<&str>,
        include_node_executions: bool,
    ) -> Vec<EnrichedLog> {
        let total = records.len();
        let mut enriched = Vec::with_capacity(total);

        for (index, record) in records.into_iter().enumerate() {
            debug!(index = index + 1, total, "enriching record");
            enriched
                .push(
                    self.enrich(record, default_app_id, include_node_executions)
                        .await,
                );
        }

        enriched
    }
}
