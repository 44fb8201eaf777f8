use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

pub use crate::domain::errors::{ClientError, ClientResult};

/// Body of an object streamed back from the service.
pub type ByteStream = BoxStream<'static, std::io::Result<Bytes>>;

/// Lazy listing of object records.
pub type ObjectStream = BoxStream<'static, ClientResult<ObjectRecord>>;

/// What a write or metadata patch sends to the service. `metadata` replaces
/// the object's metadata wholesale.
#[derive(Debug, Clone)]
pub struct ObjectSpec {
    pub bucket: String,
    pub name: String,
    pub metadata: HashMap<String, String>,
}

/// What the service reports about a stored object.
///
/// `media_link` is the second half of the two-step download protocol: the
/// record resolves the link, and the body is then streamed from that link.
#[derive(Debug, Clone)]
pub struct ObjectRecord {
    pub name: String,
    pub size: u64,
    pub media_link: String,
    pub metadata: HashMap<String, String>,
}

/// Port for the remote object-storage service.
///
/// This abstracts the vendor SDK (authentication, wire protocol, paging);
/// implementations are assumed to report failures through [`ClientError`]
/// without retrying on their own - retrying is this crate's job.
#[async_trait]
pub trait CloudStorageClient: Send + Sync + 'static {
    /// Probe a bucket for existence. Absence reports as `NotFound`.
    async fn get_bucket(&self, bucket: &str) -> ClientResult<()>;

    /// Create a bucket in the given project. A concurrent creation reports
    /// as `Conflict`.
    async fn create_bucket(&self, project_id: &str, bucket: &str) -> ClientResult<()>;

    /// Upload an object, overwriting any existing object at that name.
    async fn upload_object(&self, spec: ObjectSpec, body: Bytes) -> ClientResult<ObjectRecord>;

    /// Fetch an object's record without its body.
    async fn get_object(&self, bucket: &str, name: &str) -> ClientResult<ObjectRecord>;

    /// Replace an object's metadata, leaving the body untouched.
    async fn patch_object(&self, spec: ObjectSpec) -> ClientResult<()>;

    async fn delete_object(&self, bucket: &str, name: &str) -> ClientResult<()>;

    /// List objects, lexicographically by name, optionally under a prefix.
    fn list_objects(&self, bucket: &str, prefix: Option<String>) -> ObjectStream;

    /// Stream an object body from a previously resolved media link.
    async fn read_media(&self, link: &str) -> ClientResult<ByteStream>;
}
