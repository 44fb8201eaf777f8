pub mod data_bus;
pub mod sagas;
pub mod subscriptions;

pub use data_bus::{DataBusStorage, DataBusStorageManagement, DataStream};
pub use sagas::{SagaData, SagaSnapshotStorage};
pub use subscriptions::SubscriptionStorage;
