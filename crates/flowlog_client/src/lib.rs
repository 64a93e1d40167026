//! HTTP client for the workflow platform log and console APIs.
//!
//! Two independent bearer-token sessions back the client: an
//! application-scoped session for the public log API, and an optional
//! console-scoped session (explicit token or email+password login) for
//! node-execution detail. The console credential is re-minted once on a 401
//! before the call degrades to empty data.
//!
//! All pagination and per-record enrichment is sequential: one HTTP call in
//! flight at a time, so row ordering stays deterministic.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod enrich;
mod retry;
mod session;

pub use client::WorkflowLogClient;
pub use session::{BearerSession, ConsoleSession};
