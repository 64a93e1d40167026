//! Top-level error wrapper types.

use crate::{ApiError, ConfigError, JsonError, ReportError};

/// This is the foundation error enum for the Flowlog workspace.
///
/// # Examples
///
/// ```
/// use flowlog_error::{FlowlogError, ApiError, ApiErrorKind};
///
/// let api_err = ApiError::new(ApiErrorKind::Transport("connection reset".into()));
/// let err: FlowlogError = api_err.into();
/// assert!(format!("{}", err).contains("API Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FlowlogErrorKind {
    /// Platform API error
    #[from(ApiError)]
    Api(ApiError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Report generation error
    #[from(ReportError)]
    Report(ReportError),
}

/// Flowlog error with kind discrimination.
///
/// # Examples
///
/// ```
/// use flowlog_error::{FlowlogResult, ConfigError};
///
/// fn might_fail() -> FlowlogResult<()> {
///     Err(ConfigError::new("missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("success"),
///     Err(e) => println!("error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Flowlog Error: {}", _0)]
pub struct FlowlogError(Box<FlowlogErrorKind>);

impl FlowlogError {
    /// Create a new error from a kind.
    pub fn new(kind: FlowlogErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FlowlogErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to FlowlogErrorKind
impl<T> From<T> for FlowlogError
where
    T: Into<FlowlogErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Flowlog operations.
///
/// # Examples
///
/// ```
/// use flowlog_error::{FlowlogResult, JsonError};
///
/// fn parse_payload() -> FlowlogResult<String> {
///     Err(JsonError::new("trailing characters"))?
/// }
/// ```
pub type FlowlogResult<T> = std::result::Result<T, FlowlogError>;
