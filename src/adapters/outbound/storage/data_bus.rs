use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, Utc};
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use tokio::io::AsyncReadExt;
use tokio_util::io::StreamReader;

use crate::adapters::outbound::storage::bucket::create_bucket_if_not_exists;
use crate::adapters::outbound::storage::retry::RetryPolicy;
use crate::config::DataBusOptions;
use crate::domain::errors::{ClientError, StorageError, StorageResult};
use crate::domain::models::{metadata_keys, TimeRange};
use crate::domain::value_objects::KeyCodec;
use crate::ports::bus::{DataBusStorage, DataBusStorageManagement, DataStream};
use crate::ports::clock::Clock;
use crate::ports::storage::{CloudStorageClient, ObjectSpec};

/// Data-bus storage that keeps each payload as one object in the remote
/// bucket, layering save/read timestamps on as object metadata.
#[derive(Clone)]
pub struct CloudDataBusStorage {
    client: Arc<dyn CloudStorageClient>,
    clock: Arc<dyn Clock>,
    options: Arc<DataBusOptions>,
    codec: KeyCodec,
    retry: RetryPolicy,
}

impl CloudDataBusStorage {
    /// Builds the adapter and runs the bucket bootstrap.
    pub async fn new(
        client: Arc<dyn CloudStorageClient>,
        clock: Arc<dyn Clock>,
        options: DataBusOptions,
    ) -> StorageResult<Self> {
        create_bucket_if_not_exists(client.as_ref(), &options.common).await?;
        let codec = KeyCodec::new(
            options.object_key_prefix.clone(),
            options.object_key_suffix.clone(),
        );
        let retry = RetryPolicy::from_options(&options.common);
        Ok(Self {
            client,
            clock,
            options: Arc::new(options),
            codec,
            retry,
        })
    }

    fn bucket(&self) -> &str {
        &self.options.common.bucket_name
    }

    fn timestamp(&self) -> String {
        self.clock.now().to_rfc3339_opts(SecondsFormat::Nanos, true)
    }

    async fn object_metadata(
        &self,
        object_name: &str,
        add_content_length: bool,
    ) -> Result<HashMap<String, String>, ClientError> {
        let record = self.client.get_object(self.bucket(), object_name).await?;
        let mut metadata = record.metadata;
        if add_content_length {
            metadata.insert(metadata_keys::LENGTH.to_owned(), record.size.to_string());
        }
        Ok(metadata)
    }

    /// Stamps the read timestamp onto the object, keeping the rest of its
    /// metadata intact.
    async fn update_last_read_time(&self, object_name: &str) -> Result<(), ClientError> {
        let mut metadata = self.object_metadata(object_name, false).await?;
        metadata.insert(metadata_keys::READ_TIME.to_owned(), self.timestamp());
        self.client
            .patch_object(ObjectSpec {
                bucket: self.bucket().to_owned(),
                name: object_name.to_owned(),
                metadata,
            })
            .await
    }
}

#[async_trait]
impl DataBusStorage for CloudDataBusStorage {
    async fn save(
        &self,
        id: &str,
        mut source: DataStream,
        metadata: Option<HashMap<String, String>>,
    ) -> StorageResult<()> {
        let object_name = self.codec.encode(id);

        // The source can only be drained once; buffer it up front so retries
        // re-upload the same bytes.
        let mut buf = Vec::new();
        source.read_to_end(&mut buf).await?;
        let body = Bytes::from(buf);

        let mut metadata_to_save = HashMap::new();
        metadata_to_save.insert(metadata_keys::SAVE_TIME.to_owned(), self.timestamp());
        if let Some(extra) = metadata {
            metadata_to_save.extend(extra);
        }

        let spec = ObjectSpec {
            bucket: self.bucket().to_owned(),
            name: object_name.clone(),
            metadata: metadata_to_save,
        };
        self.retry
            .execute(&object_name, || {
                let spec = spec.clone();
                let body = body.clone();
                async move { self.client.upload_object(spec, body).await.map(|_| ()) }
            })
            .await
    }

    async fn read(&self, id: &str) -> StorageResult<DataStream> {
        let object_name = self.codec.encode(id);
        self.retry
            .execute(&object_name, || async {
                if !self.options.common.do_not_update_last_read_time {
                    self.update_last_read_time(&object_name).await?;
                }

                // Two-step download: resolve the content link from the object
                // record, then stream the body from that link.
                let record = self.client.get_object(self.bucket(), &object_name).await?;
                let body = self.client.read_media(&record.media_link).await?;
                let stream: DataStream = Box::new(StreamReader::new(body));
                Ok(stream)
            })
            .await
    }

    async fn read_metadata(&self, id: &str) -> StorageResult<HashMap<String, String>> {
        let object_name = self.codec.encode(id);
        self.retry
            .execute(&object_name, || self.object_metadata(&object_name, true))
            .await
    }
}

#[async_trait]
impl DataBusStorageManagement for CloudDataBusStorage {
    async fn delete(&self, id: &str) -> StorageResult<()> {
        let object_name = self.codec.encode(id);
        // Absence propagates as not-found, for symmetry with read.
        self.retry
            .execute(&object_name, || {
                self.client.delete_object(self.bucket(), &object_name)
            })
            .await
    }

    fn query(
        &self,
        read_time: Option<TimeRange>,
        save_time: Option<TimeRange>,
    ) -> BoxStream<'static, StorageResult<String>> {
        let bucket = self.bucket().to_owned();
        let codec = self.codec.clone();
        let prefix = codec.prefix().to_owned();

        let ids = self
            .client
            .list_objects(&bucket, Some(prefix))
            .map(move |item| match item {
                Ok(record) => Ok(codec.decode(&record.name)),
                Err(source) => Err(StorageError::Backend {
                    name: bucket.clone(),
                    source,
                }),
            })
            .try_filter_map(|decoded| futures::future::ready(Ok(decoded)));

        if read_time.is_none() && save_time.is_none() {
            // No criteria: ids come straight off the listing, without one
            // metadata round-trip per object.
            return ids.boxed();
        }

        let this = self.clone();
        ids.and_then(move |id| {
            let this = this.clone();
            async move {
                let metadata = this.read_metadata(&id).await?;
                Ok((id, metadata))
            }
        })
        .try_filter_map(move |(id, metadata)| {
            let keep = matches_range(&metadata, metadata_keys::READ_TIME, read_time)
                && matches_range(&metadata, metadata_keys::SAVE_TIME, save_time);
            futures::future::ready(Ok(keep.then_some(id)))
        })
        .boxed()
    }
}

/// Whether the metadata entry under `key` parses to a timestamp inside
/// `range`. Without a range everything matches; with one, a missing or
/// unparseable entry does not.
fn matches_range(
    metadata: &HashMap<String, String>,
    key: &str,
    range: Option<TimeRange>,
) -> bool {
    let Some(range) = range else {
        return true;
    };
    let Some(value) = metadata.get(key) else {
        return false;
    };
    match DateTime::parse_from_rfc3339(value) {
        Ok(time) => range.contains(time.with_timezone(&Utc)),
        Err(_) => false,
    }
}
