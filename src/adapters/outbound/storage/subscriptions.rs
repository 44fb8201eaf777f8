use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;

use crate::adapters::outbound::storage::bucket::create_bucket_if_not_exists;
use crate::adapters::outbound::storage::retry::RetryPolicy;
use crate::config::SubscriptionOptions;
use crate::domain::errors::StorageResult;
use crate::ports::bus::SubscriptionStorage;
use crate::ports::storage::{CloudStorageClient, ObjectSpec};

/// Centralized topic registry: one empty marker object per
/// (topic, subscriber) pair. The marker's existence is the registration;
/// its body stays empty.
#[derive(Clone)]
pub struct CloudSubscriptionStorage {
    client: Arc<dyn CloudStorageClient>,
    options: Arc<SubscriptionOptions>,
    retry: RetryPolicy,
}

impl CloudSubscriptionStorage {
    /// Builds the adapter and runs the bucket bootstrap.
    pub async fn new(
        client: Arc<dyn CloudStorageClient>,
        options: SubscriptionOptions,
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

    /// Listing stem shared by every subscriber of the topic.
    fn topic_stem(&self, topic: &str) -> String {
        format!("{}{}/", self.options.object_key_prefix, topic)
    }

    fn entry_object(&self, topic: &str, subscriber_address: &str) -> String {
        format!("{}{}", self.topic_stem(topic), subscriber_address)
    }
}

#[async_trait]
impl SubscriptionStorage for CloudSubscriptionStorage {
    fn is_centralized(&self) -> bool {
        true
    }

    async fn get_subscriber_addresses(&self, topic: &str) -> StorageResult<Vec<String>> {
        let stem = self.topic_stem(topic);
        self.retry
            .execute(&stem, || async {
                let mut listing = self.client.list_objects(self.bucket(), Some(stem.clone()));
                let mut addresses = Vec::new();
                while let Some(record) = listing.try_next().await? {
                    if let Some(address) = record.name.strip_prefix(&stem) {
                        addresses.push(address.to_owned());
                    }
                }
                Ok(addresses)
            })
            .await
    }

    async fn register_subscriber(
        &self,
        topic: &str,
        subscriber_address: &str,
    ) -> StorageResult<()> {
        let object_name = self.entry_object(topic, subscriber_address);
        self.retry
            .execute(&object_name, || async {
                let spec = ObjectSpec {
                    bucket: self.bucket().to_owned(),
                    name: object_name.clone(),
                    metadata: HashMap::new(),
                };
                self.client.upload_object(spec, Bytes::new()).await.map(|_| ())
            })
            .await
    }

    async fn unregister_subscriber(
        &self,
        topic: &str,
        subscriber_address: &str,
    ) -> StorageResult<()> {
        let object_name = self.entry_object(topic, subscriber_address);
        // Absence propagates as not-found, matching blob deletion.
        self.retry
            .execute(&object_name, || {
                self.client.delete_object(self.bucket(), &object_name)
            })
            .await
    }
}
