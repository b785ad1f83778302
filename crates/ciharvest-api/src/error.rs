use thiserror::Error;

/// Errors raised while discovering repositories or harvesting logs
#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HarvestError {
    /// Errors that must stop the whole run rather than a single repository
    /// or job.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            HarvestError::AuthenticationFailed(_) | HarvestError::InvalidConfig(_)
        )
    }
}

pub type HarvestResult<T> = Result<T, HarvestError>;

impl From<serde_json::Error> for HarvestError {
    fn from(err: serde_json::Error) -> Self {
        HarvestError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for HarvestError {
    fn from(err: std::io::Error) -> Self {
        HarvestError::Io(err.to_string())
    }
}
