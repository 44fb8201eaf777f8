use thiserror::Error;

use super::{ClientError, ConfigError};

/// Errors that can surface from the storage adapters.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested object is absent. Never retried: a 404 is an answer,
    /// not a glitch.
    #[error("object not found: {name}")]
    ObjectNotFound { name: String },

    /// Bucket bootstrap failed for a reason other than a lost creation race.
    #[error("bootstrap of bucket {bucket} failed")]
    BucketBootstrap {
        bucket: String,
        #[source]
        source: ClientError,
    },

    /// Transient failures outlasted the retry budget; carries the last one.
    #[error("remote operation on {name} failed after {attempts} attempts")]
    RetriesExhausted {
        name: String,
        attempts: u32,
        #[source]
        source: ClientError,
    },

    /// A remote failure on a path that is not retry-wrapped (lazy listings).
    #[error("remote storage failure on {name}")]
    Backend {
        name: String,
        #[source]
        source: ClientError,
    },

    /// A JSON document could not be encoded or decoded.
    #[error("JSON document {name} could not be processed")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stored snapshot carries a different type tag than the caller asked for.
    #[error("snapshot holds kind `{found}`, expected `{expected}`")]
    SnapshotTypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    /// Failure while draining the caller-supplied source stream.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
