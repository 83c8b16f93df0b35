//! Errors raised while running a program on a backend.

use thiserror::Error;

/// Why an executor could not produce a result.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// The requested backend type does not exist or cannot be used.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// Credentials missing or rejected.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The job with this id ended in the failed state.
    #[error("Job {0} failed")]
    JobFailed(String),

    /// The job with this id was cancelled before completing.
    #[error("Job {0} was cancelled")]
    JobCancelled(String),

    /// A project, asset, job or result the backend refers to is gone.
    #[error("Not found on backend: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unreadable backend response: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The executor was set up incorrectly.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The job with this id was still pending after the last poll.
    #[error("Timed out waiting for job {0}")]
    Timeout(String),

    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// A histogram key or probability that cannot be turned into outcomes.
    #[error("Malformed result: {0}")]
    MalformedResult(String),

    /// Any other error response from the backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for executor operations.
pub type HalResult<T> = Result<T, HalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_errors_name_the_job() {
        assert_eq!(HalError::JobFailed("509".into()).to_string(), "Job 509 failed");
        assert_eq!(
            HalError::JobCancelled("509".into()).to_string(),
            "Job 509 was cancelled"
        );
        assert_eq!(
            HalError::Timeout("509".into()).to_string(),
            "Timed out waiting for job 509"
        );
    }
}
