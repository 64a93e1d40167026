//! Completion notification seam.

use async_trait::async_trait;
use flowlog_error::FlowlogResult;
use flowlog_report::OutputFormat;
use std::path::PathBuf;
use tracing::info;

/// Invoked once at the end of a run with the produced report paths.
///
/// The transport (email, chat webhook, ...) is external to this system;
/// delivery is not guaranteed and failures never fail the run.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Announces a finished run.
    ///
    /// # Errors
    ///
    /// Implementations may fail; the pipeline logs the failure and moves on.
    async fn notify(&self, format: OutputFormat, written: &[PathBuf]) -> FlowlogResult<()>;
}

/// Default notifier: emits a structured log event.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, format: OutputFormat, written: &[PathBuf]) -> FlowlogResult<()> {
        let paths: Vec<String> = written
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        info!(
            format = %format,
            files = paths.join(", "),
            "report run complete"
        );
        Ok(())
    }
}
