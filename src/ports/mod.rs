pub mod bus;
pub mod clock;
pub mod storage;

// Re-export all port traits for convenience
pub use bus::{
    DataBusStorage, DataBusStorageManagement, DataStream, SagaData, SagaSnapshotStorage,
    SubscriptionStorage,
};
pub use clock::{Clock, SystemClock};
pub use storage::{
    ByteStream, CloudStorageClient, ObjectRecord, ObjectSpec, ObjectStream,
};
