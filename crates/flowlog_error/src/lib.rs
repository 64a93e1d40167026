//! Error types for the Flowlog reporting pipeline.
//!
//! This crate provides the foundation error types used throughout the Flowlog
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use flowlog_error::{FlowlogResult, ApiError, ApiErrorKind};
//!
//! fn fetch_data() -> FlowlogResult<String> {
//!     Err(ApiError::new(ApiErrorKind::Transport("connection refused".into())))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod error;
mod json;
mod report;

pub use api::{ApiError, ApiErrorKind};
pub use config::ConfigError;
pub use error::{FlowlogError, FlowlogErrorKind, FlowlogResult};
pub use json::JsonError;
pub use report::{ReportError, ReportErrorKind};
