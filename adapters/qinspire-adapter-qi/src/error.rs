//! Error types for the Quantum Inspire adapter.

use thiserror::Error;

/// Result type for Quantum Inspire operations.
pub type QiResult<T> = Result<T, QiError>;

/// Errors that can occur when talking to Quantum Inspire.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Neither a token nor an email/password pair was configured.
    #[error("Missing Quantum Inspire credentials: set QI_TOKEN or QI_EMAIL and QI_PASSWORD")]
    MissingCredentials,

    /// API returned an error response.
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// No backend type with the requested name exists.
    #[error("Backend type not found: {0}")]
    UnknownBackendType(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Job finished in the FAILED state.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// Job finished in the CANCELLED state.
    #[error("Job cancelled: {0}")]
    JobCancelled(String),

    /// Job did not complete within the configured number of polls.
    #[error("Timeout waiting for job: {0}")]
    Timeout(String),
}

impl From<QiError> for qinspire_hal::HalError {
    fn from(e: QiError) -> Self {
        match e {
            QiError::MissingCredentials => {
                qinspire_hal::HalError::AuthenticationFailed(e.to_string())
            }
            QiError::ApiError {
                status: 401 | 403, ..
            } => qinspire_hal::HalError::AuthenticationFailed(e.to_string()),
            QiError::UnknownBackendType(name) => qinspire_hal::HalError::BackendUnavailable(name),
            QiError::NotFound(what) => qinspire_hal::HalError::NotFound(what),
            QiError::JobFailed(msg) => qinspire_hal::HalError::JobFailed(msg),
            QiError::JobCancelled(id) => qinspire_hal::HalError::JobCancelled(id),
            QiError::Timeout(id) => qinspire_hal::HalError::Timeout(id),
            QiError::Http(err) => qinspire_hal::HalError::Network(err),
            QiError::Json(err) => qinspire_hal::HalError::Serialization(err),
            QiError::ApiError { .. } => qinspire_hal::HalError::Backend(e.to_string()),
        }
    }
}
