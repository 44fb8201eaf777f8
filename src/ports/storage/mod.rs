pub mod object_client;

pub use object_client::{
    ByteStream, ClientError, ClientResult, CloudStorageClient, ObjectRecord, ObjectSpec,
    ObjectStream,
};
