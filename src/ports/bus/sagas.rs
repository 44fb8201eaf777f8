use std::collections::HashMap;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::errors::StorageResult;
use crate::domain::value_objects::SnapshotKey;

/// Saga state that can be archived: serializable, carrying its own identity
/// and revision, plus a stable type tag so polymorphic payloads round-trip.
pub trait SagaData: Serialize + DeserializeOwned + Send + Sync {
    /// Type discriminator persisted with every snapshot of this type. Must
    /// stay stable across versions of the owning service.
    const KIND: &'static str;

    fn id(&self) -> Uuid;

    fn revision(&self) -> u64;
}

/// Storage contract for the bus runtime's saga-snapshot archive.
///
/// The archive is append-only: a given (id, revision) pair is written once
/// and never overwritten or deleted by this layer.
#[async_trait]
pub trait SagaSnapshotStorage: Send + Sync {
    /// Archives the saga data and its audit metadata under the data's current
    /// id and revision.
    async fn save<D: SagaData>(
        &self,
        saga_data: &D,
        audit_metadata: &HashMap<String, String>,
    ) -> StorageResult<()>;

    /// Loads the archived saga data for the given id and revision.
    async fn get_saga_data<D: SagaData>(
        &self,
        saga_data_id: Uuid,
        revision: u64,
    ) -> StorageResult<D>;

    /// Loads the audit metadata archived next to the saga data.
    async fn get_saga_metadata(
        &self,
        saga_data_id: Uuid,
        revision: u64,
    ) -> StorageResult<HashMap<String, String>>;

    /// Raw names of every object in the bucket. Maintenance tooling only.
    fn list_all_objects(&self) -> BoxStream<'static, StorageResult<String>>;

    /// All complete snapshots in the archive, ascending by id and revision.
    /// Groups missing one of their two documents are excluded.
    async fn list_snapshots(&self) -> StorageResult<Vec<SnapshotKey>>;
}
