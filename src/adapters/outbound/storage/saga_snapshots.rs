use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use tokio::io::AsyncReadExt;
use tokio_util::io::StreamReader;
use uuid::Uuid;

use crate::adapters::outbound::storage::bucket::create_bucket_if_not_exists;
use crate::adapters::outbound::storage::retry::RetryPolicy;
use crate::config::SagaSnapshotOptions;
use crate::domain::errors::{ClientError, StorageError, StorageResult};
use crate::domain::models::SnapshotEnvelope;
use crate::domain::value_objects::{SnapshotKey, SnapshotLeaf};
use crate::ports::bus::{SagaData, SagaSnapshotStorage};
use crate::ports::storage::{CloudStorageClient, ObjectSpec};

/// Append-only archive of saga snapshots: two sibling JSON documents per
/// (id, revision), never overwritten or deleted by this layer.
#[derive(Clone)]
pub struct CloudSagaSnapshotStorage {
    client: Arc<dyn CloudStorageClient>,
    options: Arc<SagaSnapshotOptions>,
    retry: RetryPolicy,
}

impl CloudSagaSnapshotStorage {
    /// Builds the adapter and runs the bucket bootstrap.
    pub async fn new(
        client: Arc<dyn CloudStorageClient>,
        options: SagaSnapshotOptions,
    ) -> StorageResult<Self> {
        create_bucket_if_not_exists(client.as_ref(), &options.common).await?;
        let retry = RetryPolicy::from_options(&options.common);
        Ok(Self {
            client,
            options: Arc::new(options),
            retry,
        })
    }

    fn bucket(&self) -> &str {
        &self.options.common.bucket_name
    }

    fn prefix(&self) -> &str {
        &self.options.object_key_prefix
    }

    async fn upload_json(&self, object_name: &str, body: &Bytes) -> Result<(), ClientError> {
        let spec = ObjectSpec {
            bucket: self.bucket().to_owned(),
            name: object_name.to_owned(),
            metadata: HashMap::new(),
        };
        self.client.upload_object(spec, body.clone()).await.map(|_| ())
    }

    /// Fetches and parses a JSON document via the two-step link protocol.
    async fn download_json<T: DeserializeOwned>(&self, object_name: &str) -> StorageResult<T> {
        let bytes = self
            .retry
            .execute(object_name, || async {
                let record = self.client.get_object(self.bucket(), object_name).await?;
                let body = self.client.read_media(&record.media_link).await?;
                let mut buf = Vec::new();
                StreamReader::new(body)
                    .read_to_end(&mut buf)
                    .await
                    .map_err(|e| ClientError::Transport {
                        message: e.to_string(),
                    })?;
                Ok(Bytes::from(buf))
            })
            .await?;

        serde_json::from_slice(&bytes).map_err(|source| StorageError::Json {
            name: object_name.to_owned(),
            source,
        })
    }
}

#[async_trait]
impl SagaSnapshotStorage for CloudSagaSnapshotStorage {
    async fn save<D: SagaData>(
        &self,
        saga_data: &D,
        audit_metadata: &HashMap<String, String>,
    ) -> StorageResult<()> {
        let key = SnapshotKey::new(saga_data.id(), saga_data.revision());
        let data_object = key.data_object(self.prefix());
        let metadata_object = key.metadata_object(self.prefix());

        let envelope = SnapshotEnvelope {
            kind: D::KIND.to_owned(),
            data: serde_json::to_value(saga_data).map_err(|source| StorageError::Json {
                name: data_object.clone(),
                source,
            })?,
        };
        let data_body = Bytes::from(serde_json::to_vec(&envelope).map_err(|source| {
            StorageError::Json {
                name: data_object.clone(),
                source,
            }
        })?);
        let metadata_body =
            Bytes::from(serde_json::to_vec(audit_metadata).map_err(|source| StorageError::Json {
                name: metadata_object.clone(),
                source,
            })?);

        // Both siblings go through one retry scope, payload first. A failure
        // between the two uploads leaves a partial pair behind; enumeration
        // skips such groups and no compensation is attempted.
        self.retry
            .execute(&data_object, || async {
                self.upload_json(&data_object, &data_body).await?;
                self.upload_json(&metadata_object, &metadata_body).await?;
                Ok(())
            })
            .await
    }

    async fn get_saga_data<D: SagaData>(
        &self,
        saga_data_id: Uuid,
        revision: u64,
    ) -> StorageResult<D> {
        let object_name = SnapshotKey::new(saga_data_id, revision).data_object(self.prefix());
        let envelope: SnapshotEnvelope = self.download_json(&object_name).await?;
        if envelope.kind != D::KIND {
            return Err(StorageError::SnapshotTypeMismatch {
                expected: D::KIND,
                found: envelope.kind,
            });
        }
        serde_json::from_value(envelope.data).map_err(|source| StorageError::Json {
            name: object_name,
            source,
        })
    }

    async fn get_saga_metadata(
        &self,
        saga_data_id: Uuid,
        revision: u64,
    ) -> StorageResult<HashMap<String, String>> {
        let object_name = SnapshotKey::new(saga_data_id, revision).metadata_object(self.prefix());
        self.download_json(&object_name).await
    }

    fn list_all_objects(&self) -> BoxStream<'static, StorageResult<String>> {
        let bucket = self.bucket().to_owned();
        self.client
            .list_objects(&bucket, None)
            .map(move |item| match item {
                Ok(record) => Ok(record.name),
                Err(source) => Err(StorageError::Backend {
                    name: bucket.clone(),
                    source,
                }),
            })
            .boxed()
    }

    async fn list_snapshots(&self) -> StorageResult<Vec<SnapshotKey>> {
        let mut listing = self
            .client
            .list_objects(self.bucket(), Some(self.prefix().to_owned()));

        let mut groups: BTreeMap<SnapshotKey, (bool, bool)> = BTreeMap::new();
        while let Some(item) = listing.next().await {
            let record = item.map_err(|source| StorageError::Backend {
                name: self.bucket().to_owned(),
                source,
            })?;
            let Some((key, leaf)) = SnapshotKey::parse(self.prefix(), &record.name) else {
                continue;
            };
            let entry = groups.entry(key).or_default();
            match leaf {
                SnapshotLeaf::Data => entry.0 = true,
                SnapshotLeaf::Metadata => entry.1 = true,
            }
        }

        Ok(groups
            .into_iter()
            .filter(|(_, (data, metadata))| *data && *metadata)
            .map(|(key, _)| key)
            .collect())
    }
}
