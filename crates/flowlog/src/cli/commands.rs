//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use flowlog_core::WorkflowStatus;
use flowlog_report::OutputFormat;
use std::path::PathBuf;

/// Flowlog - workflow execution log reporting pipeline
#[derive(Parser, Debug)]
#[command(name = "flowlog")]
#[command(about = "Fetch workflow execution logs and export CSV/Markdown/JSON reports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the reporting pipeline
    Run(RunArgs),

    /// List the configuration profiles found on this machine
    Profiles,
}

/// Flags for one pipeline run.
///
/// Every flag is optional; a `--profile` fills whatever the command line
/// leaves unset.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Platform base URL (e.g. https://api.example.com)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Application API token
    #[arg(long)]
    pub api_token: Option<String>,

    /// Application id for node-execution lookups
    #[arg(long)]
    pub app_id: Option<String>,

    /// Console API token (for node-execution detail)
    #[arg(long)]
    pub console_token: Option<String>,

    /// Console login email (auto-mints a console token)
    #[arg(long)]
    pub console_email: Option<String>,

    /// Console login password
    #[arg(long)]
    pub console_password: Option<String>,

    /// Keyword filter (matches inputs, outputs, session and run ids)
    #[arg(long)]
    pub keyword: Option<String>,

    /// Execution status filter
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    /// Only logs created after this time (ISO 8601, e.g. 2024-01-01T00:00:00Z)
    #[arg(long = "after")]
    pub created_at_after: Option<String>,

    /// Only logs created before this time (ISO 8601)
    #[arg(long = "before")]
    pub created_at_before: Option<String>,

    /// End-user session id filter
    #[arg(long)]
    pub end_user_session_id: Option<String>,

    /// Account email filter
    #[arg(long = "account")]
    pub account_email: Option<String>,

    /// Page number (ignored with --fetch-all)
    #[arg(long)]
    pub page: Option<u64>,

    /// Page size, 1-100
    #[arg(long)]
    pub limit: Option<u64>,

    /// Walk every page instead of fetching one
    #[arg(long)]
    pub fetch_all: bool,

    /// Page-walk ceiling for --fetch-all
    #[arg(long)]
    pub max_pages: Option<u64>,

    /// Fetch run detail per record
    #[arg(long)]
    pub with_details: bool,

    /// Fetch node-execution detail per record (needs console access)
    #[arg(long)]
    pub with_node_executions: bool,

    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Directory the report files are written into
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Named configuration profile filling unset flags
    #[arg(long)]
    pub profile: Option<String>,

    /// Send the completion notification
    #[arg(long)]
    pub notify: bool,
}

/// Execution status filter values
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StatusArg {
    /// Run completed successfully
    Succeeded,
    /// Run failed
    Failed,
    /// Run was stopped before completion
    Stopped,
    /// Run completed with node-level exceptions
    PartialSucceeded,
}

impl From<StatusArg> for WorkflowStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Succeeded => WorkflowStatus::Succeeded,
            StatusArg::Failed => WorkflowStatus::Failed,
            StatusArg::Stopped => WorkflowStatus::Stopped,
            StatusArg::PartialSucceeded => WorkflowStatus::PartialSucceeded,
        }
    }
}

/// Report format values
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    /// Four CSV files with fixed headers
    Csv,
    /// A single Markdown report
    Markdown,
    /// A single JSON dump of the enriched payload
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}
