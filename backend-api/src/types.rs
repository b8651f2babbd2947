use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendApiError {
    #[error("Network error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-2xx answer. `message` is what the backend said, or a generic
    /// status line when the body carried nothing usable.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("Decoding raw response error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl BackendApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            BackendApiError::Status { status, .. } => Some(*status),
            BackendApiError::Reqwest(e) => e.status(),
            BackendApiError::Serde(_) => None,
        }
    }
}

/// A call to the backend can either result in a success with the success type or fail with a [`BackendApiError`].
pub type ApiResponse<T> = Result<T, BackendApiError>;
