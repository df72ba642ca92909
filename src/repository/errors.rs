use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    #[error("Remote source responded with {status}: {message}")]
    RemoteError { status: u16, message: String },

    #[error("Transform error: {0}")]
    TransformError(String),

    #[error("Malformed record: missing {0}")]
    MalformedRecord(&'static str),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Whether another attempt at the same fetch could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RepositoryError::NetworkUnavailable(_) | RepositoryError::RemoteError { .. }
        )
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            return RepositoryError::NetworkUnavailable(err.to_string());
        }

        if let Some(status) = err.status() {
            return RepositoryError::RemoteError {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }

        if err.is_decode() {
            return RepositoryError::TransformError(format!("Response decode error: {err}"));
        }

        if err.is_request() {
            return RepositoryError::NetworkUnavailable(err.to_string());
        }

        RepositoryError::Unexpected(format!("Unexpected HTTP error: {err}"))
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::TransformError(format!("Serialization error: {err}"))
    }
}

impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        RepositoryError::Storage(err.to_string())
    }
}
