//! Tabular report derivation and rendering for workflow logs.
//!
//! Takes the enriched result payload and reshapes it into row-oriented
//! tables (overview statistics, daily counts, user statistics,
//! question/answer rows with dynamically-widened citation columns), then
//! serializes them as CSV, Markdown or JSON report files.
//!
//! Rows are always built fully in memory before any serialization: the
//! question/answer CSV sizes its segment columns to the run's maximum, which
//! needs a pre-pass over every row.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extract;
mod render;
mod sink;
mod tables;
mod time;

pub use render::{render, OutputFormat, ReportFile};
pub use sink::{FilesystemSink, ReportSink};
pub use tables::{DailyCount, OverviewRow, QaRow, QaTable, ReportTables, UserStat};
