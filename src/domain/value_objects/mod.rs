pub mod object_key;
pub mod snapshot_key;

pub use object_key::KeyCodec;
pub use snapshot_key::{SnapshotKey, SnapshotLeaf};
