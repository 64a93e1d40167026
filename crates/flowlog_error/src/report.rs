//! Report generation error types.

/// Specific failure conditions while building or writing reports.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ReportErrorKind {
    /// Filesystem operation failed
    #[display("I/O failure: {}", _0)]
    Io(String),
    /// CSV serialization failed
    #[display("CSV failure: {}", _0)]
    Csv(String),
    /// Payload serialization failed
    #[display("serialization failure: {}", _0)]
    Serialize(String),
}

/// Report error with source location tracking.
///
/// # Examples
///
/// ```
/// use flowlog_error::{ReportError, ReportErrorKind};
///
/// let err = ReportError::new(ReportErrorKind::Io("permission denied".into()));
/// assert!(format!("{}", err).contains("permission denied"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Report Error: {} at line {} in {}", kind, line, file)]
pub struct ReportError {
    /// The kind of error that occurred
    pub kind: ReportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ReportError {
    /// Create a new ReportError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ReportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
