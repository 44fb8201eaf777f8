use tracing::info;

use crate::config::StorageOptions;
use crate::domain::errors::{ClientError, StorageError, StorageResult};
use crate::ports::storage::CloudStorageClient;

/// Creates the configured bucket if it does not exist yet.
///
/// Runs once per adapter construction, not per operation, and is a no-op when
/// auto-creation is disabled. A `NotFound` answer on the existence probe means
/// "absent", not an error. Losing a creation race to another process reports
/// as `Conflict` and counts as success; any other creation failure is fatal
/// and is not retried.
pub async fn create_bucket_if_not_exists(
    client: &dyn CloudStorageClient,
    options: &StorageOptions,
) -> StorageResult<()> {
    if !options.auto_create_bucket {
        return Ok(());
    }

    match client.get_bucket(&options.bucket_name).await {
        Ok(()) => return Ok(()),
        Err(ClientError::NotFound { .. }) => {}
        Err(source) => {
            return Err(StorageError::BucketBootstrap {
                bucket: options.bucket_name.clone(),
                source,
            });
        }
    }

    info!(bucket = %options.bucket_name, "bucket does not exist - creating it now");
    match client.create_bucket(&options.project_id, &options.bucket_name).await {
        Ok(()) | Err(ClientError::Conflict { .. }) => Ok(()),
        Err(source) => Err(StorageError::BucketBootstrap {
            bucket: options.bucket_name.clone(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::storage::memory::InMemoryStorageClient;
    use crate::domain::errors::ClientResult;
    use crate::ports::storage::{ByteStream, ObjectRecord, ObjectSpec, ObjectStream};
    use async_trait::async_trait;
    use bytes::Bytes;

    fn options() -> StorageOptions {
        StorageOptions::new("test-project", "test-bucket").unwrap()
    }

    /// Client whose bucket calls answer from a script; object calls are
    /// never reached by the bootstrap.
    struct ScriptedBucketClient {
        get: ClientResult<()>,
        create: ClientResult<()>,
    }

    #[async_trait]
    impl CloudStorageClient for ScriptedBucketClient {
        async fn get_bucket(&self, _bucket: &str) -> ClientResult<()> {
            self.get.clone()
        }

        async fn create_bucket(&self, _project_id: &str, _bucket: &str) -> ClientResult<()> {
            self.create.clone()
        }

        async fn upload_object(
            &self,
            _spec: ObjectSpec,
            _body: Bytes,
        ) -> ClientResult<ObjectRecord> {
            unreachable!("bootstrap never touches objects")
        }

        async fn get_object(&self, _bucket: &str, _name: &str) -> ClientResult<ObjectRecord> {
            unreachable!("bootstrap never touches objects")
        }

        async fn patch_object(&self, _spec: ObjectSpec) -> ClientResult<()> {
            unreachable!("bootstrap never touches objects")
        }

        async fn delete_object(&self, _bucket: &str, _name: &str) -> ClientResult<()> {
            unreachable!("bootstrap never touches objects")
        }

        fn list_objects(&self, _bucket: &str, _prefix: Option<String>) -> ObjectStream {
            unreachable!("bootstrap never touches objects")
        }

        async fn read_media(&self, _link: &str) -> ClientResult<ByteStream> {
            unreachable!("bootstrap never touches objects")
        }
    }

    #[tokio::test]
    async fn disabled_auto_creation_is_a_no_op() {
        let client = ScriptedBucketClient {
            get: Err(ClientError::Service {
                code: 500,
                message: "should never be called".into(),
            }),
            create: Err(ClientError::Service {
                code: 500,
                message: "should never be called".into(),
            }),
        };
        let options = options().with_auto_create_bucket(false);

        create_bucket_if_not_exists(&client, &options).await.unwrap();
    }

    #[tokio::test]
    async fn absent_bucket_is_created() {
        let client = InMemoryStorageClient::new();
        create_bucket_if_not_exists(&client, &options()).await.unwrap();
        client.get_bucket("test-bucket").await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_bootstrap_against_existing_bucket_never_raises() {
        let client = InMemoryStorageClient::new();
        let options = options();
        create_bucket_if_not_exists(&client, &options).await.unwrap();

        let (a, b) = tokio::join!(
            create_bucket_if_not_exists(&client, &options),
            create_bucket_if_not_exists(&client, &options),
        );
        a.unwrap();
        b.unwrap();
    }

    #[tokio::test]
    async fn lost_creation_race_counts_as_success() {
        let client = ScriptedBucketClient {
            get: Err(ClientError::NotFound {
                name: "test-bucket".into(),
            }),
            create: Err(ClientError::Conflict {
                name: "test-bucket".into(),
            }),
        };

        create_bucket_if_not_exists(&client, &options()).await.unwrap();
    }

    #[tokio::test]
    async fn other_creation_failures_are_fatal() {
        let client = ScriptedBucketClient {
            get: Err(ClientError::NotFound {
                name: "test-bucket".into(),
            }),
            create: Err(ClientError::Service {
                code: 403,
                message: "permission denied".into(),
            }),
        };

        let err = create_bucket_if_not_exists(&client, &options())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::BucketBootstrap { .. }));
    }

    #[tokio::test]
    async fn failing_existence_probe_is_fatal() {
        let client = ScriptedBucketClient {
            get: Err(ClientError::Service {
                code: 500,
                message: "backend unavailable".into(),
            }),
            create: Ok(()),
        };

        let err = create_bucket_if_not_exists(&client, &options())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::BucketBootstrap { .. }));
    }
}
