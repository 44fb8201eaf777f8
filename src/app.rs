use std::sync::Arc;

use crate::adapters::outbound::storage::{
    CloudDataBusStorage, CloudSagaSnapshotStorage, CloudSubscriptionStorage,
    InMemoryStorageClient,
};
use crate::config::{DataBusOptions, SagaSnapshotOptions, SubscriptionOptions};
use crate::domain::errors::{ConfigError, StorageResult};
use crate::ports::clock::{Clock, SystemClock};
use crate::ports::storage::CloudStorageClient;

/// Top-level configuration for wiring all three adapters against one bucket.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub project_id: String,
    pub bucket_name: String,
}

impl AppConfig {
    pub fn new(project_id: impl Into<String>, bucket_name: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            bucket_name: bucket_name.into(),
        }
    }

    /// Reads `BUS_STORAGE_PROJECT_ID` and `BUS_STORAGE_BUCKET`, honoring a
    /// `.env` file when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let project_id = std::env::var("BUS_STORAGE_PROJECT_ID").unwrap_or_default();
        let bucket_name = std::env::var("BUS_STORAGE_BUCKET").unwrap_or_default();
        if project_id.trim().is_empty() {
            return Err(ConfigError::MissingOption {
                name: "BUS_STORAGE_PROJECT_ID",
            });
        }
        if bucket_name.trim().is_empty() {
            return Err(ConfigError::MissingOption {
                name: "BUS_STORAGE_BUCKET",
            });
        }
        Ok(Self {
            project_id,
            bucket_name,
        })
    }
}

/// The three storage services, ready to hand to the bus runtime.
pub struct AppServices {
    pub data_bus: CloudDataBusStorage,
    pub subscriptions: CloudSubscriptionStorage,
    pub saga_snapshots: CloudSagaSnapshotStorage,
}

/// Builder wiring one shared storage-client handle into all three adapters.
pub struct AppBuilder {
    config: AppConfig,
    client: Arc<dyn CloudStorageClient>,
    clock: Arc<dyn Clock>,
}

impl AppBuilder {
    pub fn new(config: AppConfig, client: Arc<dyn CloudStorageClient>) -> Self {
        Self {
            config,
            client,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Constructs the three adapters; each runs its own bucket bootstrap.
    pub async fn build(self) -> StorageResult<AppServices> {
        let data_bus = CloudDataBusStorage::new(
            self.client.clone(),
            self.clock.clone(),
            DataBusOptions::new(&self.config.project_id, &self.config.bucket_name)?,
        )
        .await?;

        let subscriptions = CloudSubscriptionStorage::new(
            self.client.clone(),
            SubscriptionOptions::new(&self.config.project_id, &self.config.bucket_name)?,
        )
        .await?;

        let saga_snapshots = CloudSagaSnapshotStorage::new(
            self.client.clone(),
            SagaSnapshotOptions::new(&self.config.project_id, &self.config.bucket_name)?,
        )
        .await?;

        Ok(AppServices {
            data_bus,
            subscriptions,
            saga_snapshots,
        })
    }
}

/// Everything wired against the in-memory backend, for tests and local runs.
pub async fn create_in_memory_app() -> StorageResult<AppServices> {
    let client = Arc::new(InMemoryStorageClient::new());
    AppBuilder::new(AppConfig::new("local-project", "bus-storage"), client)
        .build()
        .await
}
