pub mod bucket;
pub mod data_bus;
pub mod memory;
pub mod retry;
pub mod saga_snapshots;
pub mod subscriptions;

// Re-export key types
pub use data_bus::CloudDataBusStorage;
pub use memory::InMemoryStorageClient;
pub use retry::RetryPolicy;
pub use saga_snapshots::CloudSagaSnapshotStorage;
pub use subscriptions::CloudSubscriptionStorage;
