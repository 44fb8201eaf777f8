#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bus_cloud_storage::ports::storage::{
    ByteStream, ClientResult, CloudStorageClient, ObjectRecord, ObjectSpec, ObjectStream,
};
use bus_cloud_storage::{Clock, DataStream, InMemoryStorageClient};
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use tokio::io::AsyncReadExt;

/// Routes adapter logs into the test harness output. Safe to call from every
/// test; only the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .try_init();
}

/// Deterministic clock: every `now()` call advances one millisecond past the
/// fixed start, so consecutive timestamps are strictly increasing and tests
/// can predict them.
pub struct TickingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl TickingClock {
    pub fn new() -> Self {
        Self {
            start: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            ticks: AtomicI64::new(0),
        }
    }

    /// The timestamp the n-th `now()` call returned (or will return).
    pub fn time_at(&self, tick: i64) -> DateTime<Utc> {
        self.start + chrono::Duration::milliseconds(tick)
    }
}

impl Clock for TickingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + chrono::Duration::milliseconds(tick)
    }
}

/// Client wrapper that counts per-object metadata fetches, to assert which
/// code paths stay off the metadata round-trip.
#[derive(Clone)]
pub struct CountingClient {
    inner: InMemoryStorageClient,
    get_object_calls: Arc<AtomicU64>,
}

impl CountingClient {
    pub fn new(inner: InMemoryStorageClient) -> Self {
        Self {
            inner,
            get_object_calls: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn get_object_calls(&self) -> u64 {
        self.get_object_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CloudStorageClient for CountingClient {
    async fn get_bucket(&self, bucket: &str) -> ClientResult<()> {
        self.inner.get_bucket(bucket).await
    }

    async fn create_bucket(&self, project_id: &str, bucket: &str) -> ClientResult<()> {
        self.inner.create_bucket(project_id, bucket).await
    }

    async fn upload_object(&self, spec: ObjectSpec, body: Bytes) -> ClientResult<ObjectRecord> {
        self.inner.upload_object(spec, body).await
    }

    async fn get_object(&self, bucket: &str, name: &str) -> ClientResult<ObjectRecord> {
        self.get_object_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_object(bucket, name).await
    }

    async fn patch_object(&self, spec: ObjectSpec) -> ClientResult<()> {
        self.inner.patch_object(spec).await
    }

    async fn delete_object(&self, bucket: &str, name: &str) -> ClientResult<()> {
        self.inner.delete_object(bucket, name).await
    }

    fn list_objects(&self, bucket: &str, prefix: Option<String>) -> ObjectStream {
        self.inner.list_objects(bucket, prefix)
    }

    async fn read_media(&self, link: &str) -> ClientResult<ByteStream> {
        self.inner.read_media(link).await
    }
}

/// A data stream over an in-memory buffer, standing in for the caller's
/// payload source.
pub fn stream_of(bytes: &[u8]) -> DataStream {
    Box::new(std::io::Cursor::new(bytes.to_vec()))
}

pub async fn read_all(mut stream: DataStream) -> Vec<u8> {
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    buf
}
