use std::collections::HashMap;

use async_trait::async_trait;
use futures::stream::BoxStream;
use tokio::io::AsyncRead;

use crate::domain::errors::StorageResult;
use crate::domain::models::TimeRange;

/// Byte stream handed across the data-bus boundary.
pub type DataStream = Box<dyn AsyncRead + Send + Unpin>;

/// Storage contract for the bus runtime's large-object ("data bus") payloads.
#[async_trait]
pub trait DataBusStorage: Send + Sync {
    /// Persists the payload under the given logical id, merging the supplied
    /// metadata with a save timestamp. Overwrites an existing payload.
    async fn save(
        &self,
        id: &str,
        source: DataStream,
        metadata: Option<HashMap<String, String>>,
    ) -> StorageResult<()>;

    /// Opens the payload for reading. By default this also stamps the read
    /// timestamp onto the stored object.
    async fn read(&self, id: &str) -> StorageResult<DataStream>;

    /// Current metadata for the payload, including its derived length.
    async fn read_metadata(&self, id: &str) -> StorageResult<HashMap<String, String>>;
}

/// Management extension of [`DataBusStorage`]: deletion and time-based
/// enumeration of stored payloads.
#[async_trait]
pub trait DataBusStorageManagement: Send + Sync {
    /// Removes the payload. An absent id surfaces as not-found, mirroring
    /// `read`.
    async fn delete(&self, id: &str) -> StorageResult<()>;

    /// Lazily yields the ids of stored payloads, optionally filtered by when
    /// they were last read or saved. Each call re-lists from scratch; without
    /// criteria no per-object metadata is fetched.
    fn query(
        &self,
        read_time: Option<TimeRange>,
        save_time: Option<TimeRange>,
    ) -> BoxStream<'static, StorageResult<String>>;
}
