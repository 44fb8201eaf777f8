pub mod blob;
pub mod snapshot;
pub mod time_range;

pub use blob::metadata_keys;
pub use snapshot::SnapshotEnvelope;
pub use time_range::TimeRange;
