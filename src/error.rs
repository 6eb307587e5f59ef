use crate::responses::ReportsError;

/// Error type for the toggl-reports crate.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ReportsClientError {
    /// No cancellation token was supplied for the request.
    #[error("A cancellation token is required to perform a report request.")]
    #[diagnostic(code(toggl_reports::error::ReportsClientError::MissingCancellationToken))]
    MissingCancellationToken,

    /// The request was cancelled through its cancellation token.
    #[error("The request has been cancelled.")]
    #[diagnostic(code(toggl_reports::error::ReportsClientError::Cancelled))]
    Cancelled,

    /// The base URL cannot be used to address the report endpoints.
    #[error("The base URL {0:?} cannot carry an endpoint path.")]
    #[diagnostic(code(toggl_reports::error::ReportsClientError::InvalidBaseUrl))]
    InvalidBaseUrl(String),

    /// The Reports API answered with a non-success status.
    #[error(transparent)]
    #[diagnostic(code(toggl_reports::error::ReportsClientError::Reports))]
    Reports(#[from] ReportsError),

    /// The request to the server has failed.
    #[error(transparent)]
    #[diagnostic(code(toggl_reports::error::ReportsClientError::ReqwestError))]
    ReqwestError(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error(transparent)]
    #[diagnostic(code(toggl_reports::error::ReportsClientError::DecodeError))]
    DecodeError(#[from] serde_json::Error),

    /// An invalid header value has been provided.
    #[error(transparent)]
    #[diagnostic(code(toggl_reports::error::ReportsClientError::InvalidHeaderValue))]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    /// Url parsing error.
    #[error(transparent)]
    #[diagnostic(code(toggl_reports::error::ReportsClientError::UrlParseError))]
    UrlParseError(#[from] url::ParseError),
}

impl ReportsClientError {
    /// Returns the vendor error, if the Reports API rejected the request.
    pub fn reports_error(&self) -> Option<&ReportsError> {
        match self {
            ReportsClientError::Reports(error) => Some(error),
            _ => None,
        }
    }

    /// Returns whether the request ended because its token was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ReportsClientError::Cancelled)
    }
}
