use thiserror::Error;

/// Failures reported by the remote object-storage service.
///
/// Classification is the whole point of this type: `NotFound` is a definitive
/// answer that retrying cannot change, while every other variant (including
/// throttling) is transient and eligible for backoff-and-retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The requested bucket or object does not exist.
    #[error("not found: {name}")]
    NotFound { name: String },

    /// The write collided with something that already exists.
    #[error("conflict: {name}")]
    Conflict { name: String },

    /// The service is throttling us.
    #[error("request rate exceeded")]
    TooManyRequests,

    /// Any other abnormal answer from the service.
    #[error("service failure ({code}): {message}")]
    Service { code: u16, message: String },

    /// The connection itself failed mid-transfer.
    #[error("transport failure: {message}")]
    Transport { message: String },
}

impl ClientError {
    /// True when retrying cannot change the outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}

/// Result type for raw storage-client calls.
pub type ClientResult<T> = Result<T, ClientError>;
