pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod ports;

// Re-export key types for convenience

// Domain types - value objects, models, and the error taxonomy
pub use domain::{
    metadata_keys, ClientError, ConfigError, KeyCodec, SnapshotEnvelope, SnapshotKey,
    StorageError, StorageResult, TimeRange,
};

// Port types - contracts for the bus runtime, the storage backend, and time
pub use ports::{
    Clock, CloudStorageClient, DataBusStorage, DataBusStorageManagement, DataStream, SagaData,
    SagaSnapshotStorage, SubscriptionStorage, SystemClock,
};

// Adapter implementations
pub use adapters::outbound::storage::{
    CloudDataBusStorage, CloudSagaSnapshotStorage, CloudSubscriptionStorage,
    InMemoryStorageClient, RetryPolicy,
};

// Configuration blocks
pub use config::{DataBusOptions, SagaSnapshotOptions, StorageOptions, SubscriptionOptions};

// Application factory and configuration
pub use app::{create_in_memory_app, AppBuilder, AppConfig, AppServices};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_in_memory_app, AppBuilder, AppConfig, AppServices, Clock, CloudDataBusStorage,
        CloudSagaSnapshotStorage, CloudStorageClient, CloudSubscriptionStorage, DataBusOptions,
        DataBusStorage, DataBusStorageManagement, InMemoryStorageClient, SagaData,
        SagaSnapshotOptions, SagaSnapshotStorage, StorageOptions, SubscriptionOptions,
        SubscriptionStorage, SystemClock, TimeRange,
    };
}
