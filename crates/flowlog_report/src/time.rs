//! Timestamp formatting helpers.

use chrono::{DateTime, Local, NaiveDate, TimeZone};

/// Epoch seconds to local wall-clock time.
pub(crate) fn local_datetime(ts: f64) -> Option<DateTime<Local>> {
    Local.timestamp_opt(ts as i64, 0).single()
}

/// Epoch seconds to the local calendar date.
pub(crate) fn local_date(ts: f64) -> Option<NaiveDate> {
    local_datetime(ts).map(|dt| dt.date_naive())
}

/// `YYYY-MM-DD HH:MM:SS` in local time, `N/A` when absent.
pub(crate) fn format_timestamp(ts: Option<f64>) -> String {
    match ts.and_then(local_datetime) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "N/A".to_string(),
    }
}

/// `YYYY-MM-DD` in local time, empty when absent.
pub(crate) fn format_date(ts: Option<f64>) -> String {
    match ts.and_then(local_date) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}
