use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Exchange rejected: {0}")]
    Exchange(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Service error: {0}")]
    Api(String),
}

impl ApiError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "Invalid input. Please check the required fields.",
            ApiError::Exchange(_) => "Exchange failed",
            ApiError::Network(e) if e.is_timeout() => "Request timed out. Please try again.",
            ApiError::Network(_) => "Service unreachable. Check your connection.",
            ApiError::Api(_) => "Service error. Please try again later.",
        }
    }

    /// Transient failures leave the caller's view of the remote job unchanged;
    /// they are surfaced as notices rather than terminal session errors.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Api(_))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
