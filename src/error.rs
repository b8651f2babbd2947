use matchlens_backend_api::BackendApiError;
use matchlens_shared::errors::InvalidRegion;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Message is whatever the backend said, shown verbatim.
    #[error("{0}")]
    Backend(#[from] BackendApiError),

    #[error(transparent)]
    InvalidRegion(#[from] InvalidRegion),

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging setup error: {0}")]
    Logging(String),

    #[error("No player loaded")]
    NoPlayerLoaded,

    #[error("Superseded by a newer request")]
    Superseded,
}
