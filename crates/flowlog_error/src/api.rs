//! Platform API error types and retry classification.

/// Specific failure conditions for calls against the platform APIs.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ApiErrorKind {
    /// Request never produced an HTTP response (DNS, connect, timeout)
    #[display("transport failure: {}", _0)]
    Transport(String),
    /// Server answered with a non-success status
    #[display("HTTP {} error: {}", status, body)]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as returned by the server
        body: String,
    },
    /// Response body could not be decoded into the expected shape
    #[display("response decode failure: {}", _0)]
    Decode(String),
}

impl ApiErrorKind {
    /// Check if this error should be retried.
    ///
    /// Transport failures and non-2xx responses are retryable; a 404 is a
    /// valid "not found" outcome and decode failures are deterministic, so
    /// neither is retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiErrorKind::Transport(_) => true,
            ApiErrorKind::Status { status, .. } => *status != 404,
            ApiErrorKind::Decode(_) => false,
        }
    }

    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiErrorKind::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Platform API error with source location tracking.
///
/// # Examples
///
/// ```
/// use flowlog_error::{ApiError, ApiErrorKind};
///
/// let err = ApiError::new(ApiErrorKind::Status { status: 500, body: "boom".into() });
/// assert!(format!("{}", err).contains("HTTP 500"));
/// assert!(err.kind.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("API Error: {} at line {} in {}", kind, line, file)]
pub struct ApiError {
    /// The kind of error that occurred
    pub kind: ApiErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ApiError {
    /// Create a new ApiError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ApiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        self.kind.status()
    }
}
