//! Flowlog - workflow execution log reporting pipeline.
//!
//! Flowlog retrieves workflow execution logs from a remote application
//! platform's REST API, optionally enriches each record with run-level and
//! node-level execution details fetched through a second
//! (session-authenticated) API, and writes the aggregated data out as CSV,
//! Markdown or JSON reports. It runs on demand, produces files, and exits.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use flowlog::{Pipeline, PipelineParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let params = PipelineParams {
//!         base_url: Some("https://api.example.com".into()),
//!         api_token: Some(std::env::var("FLOWLOG_API_TOKEN")?),
//!         fetch_all: true,
//!         with_details: true,
//!         ..Default::default()
//!     };
//!
//!     let outcome = Pipeline::new(params)?.run().await?;
//!     println!("wrote {} report file(s)", outcome.written.len());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Flowlog is organized as a workspace with focused crates:
//!
//! - `flowlog_core` - Data model and the nested-JSON decoder
//! - `flowlog_error` - Error types
//! - `flowlog_client` - Dual-session HTTP client with retry and re-login
//! - `flowlog_report` - Table derivation and CSV/Markdown/JSON rendering
//!
//! This crate (`flowlog`) adds the pipeline orchestrator, configuration
//! profiles, the notification hook, and the CLI binary, and re-exports the
//! rest for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod notify;
mod params;
mod pipeline;
mod profile;

pub use notify::{LogNotifier, Notifier};
pub use params::{PipelineParams, ResolvedParams};
pub use pipeline::{Pipeline, PipelineOutcome};
pub use profile::Profiles;

// Re-export the workspace crates for convenience
pub use flowlog_client::*;
pub use flowlog_core::*;
pub use flowlog_error::*;
pub use flowlog_report::*;
