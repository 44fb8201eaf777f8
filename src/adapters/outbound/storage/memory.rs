use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use tokio::sync::RwLock;

use crate::domain::errors::{ClientError, ClientResult};
use crate::ports::storage::{
    ByteStream, CloudStorageClient, ObjectRecord, ObjectSpec, ObjectStream,
};

const MEDIA_SCHEME: &str = "mem://";
const MEDIA_CHUNK: usize = 64 * 1024;

/// In-memory stand-in for the remote storage service, for tests and local
/// development.
///
/// Objects live in a `BTreeMap` per bucket, so listings come back
/// lexicographically by name, matching the remote service. Media links use a
/// `mem://bucket/name` scheme that `read_media` resolves against the same
/// state.
#[derive(Clone, Default)]
pub struct InMemoryStorageClient {
    state: Arc<RwLock<State>>,
}

#[derive(Default)]
struct State {
    buckets: HashMap<String, BTreeMap<String, StoredObject>>,
}

#[derive(Clone)]
struct StoredObject {
    data: Bytes,
    metadata: HashMap<String, String>,
}

impl InMemoryStorageClient {
    pub fn new() -> Self {
        Self::default()
    }
}

fn media_link(bucket: &str, name: &str) -> String {
    format!("{MEDIA_SCHEME}{bucket}/{name}")
}

fn record(bucket: &str, name: &str, object: &StoredObject) -> ObjectRecord {
    ObjectRecord {
        name: name.to_owned(),
        size: object.data.len() as u64,
        media_link: media_link(bucket, name),
        metadata: object.metadata.clone(),
    }
}

#[async_trait]
impl CloudStorageClient for InMemoryStorageClient {
    async fn get_bucket(&self, bucket: &str) -> ClientResult<()> {
        let state = self.state.read().await;
        if state.buckets.contains_key(bucket) {
            Ok(())
        } else {
            Err(ClientError::NotFound {
                name: bucket.to_owned(),
            })
        }
    }

    async fn create_bucket(&self, _project_id: &str, bucket: &str) -> ClientResult<()> {
        let mut state = self.state.write().await;
        if state.buckets.contains_key(bucket) {
            return Err(ClientError::Conflict {
                name: bucket.to_owned(),
            });
        }
        state.buckets.insert(bucket.to_owned(), BTreeMap::new());
        Ok(())
    }

    async fn upload_object(&self, spec: ObjectSpec, body: Bytes) -> ClientResult<ObjectRecord> {
        let mut state = self.state.write().await;
        let objects = state
            .buckets
            .get_mut(&spec.bucket)
            .ok_or_else(|| ClientError::NotFound {
                name: spec.bucket.clone(),
            })?;
        let stored = StoredObject {
            data: body,
            metadata: spec.metadata,
        };
        let rec = record(&spec.bucket, &spec.name, &stored);
        objects.insert(spec.name, stored);
        Ok(rec)
    }

    async fn get_object(&self, bucket: &str, name: &str) -> ClientResult<ObjectRecord> {
        let state = self.state.read().await;
        state
            .buckets
            .get(bucket)
            .and_then(|objects| objects.get(name))
            .map(|object| record(bucket, name, object))
            .ok_or_else(|| ClientError::NotFound {
                name: name.to_owned(),
            })
    }

    async fn patch_object(&self, spec: ObjectSpec) -> ClientResult<()> {
        let mut state = self.state.write().await;
        let object = state
            .buckets
            .get_mut(&spec.bucket)
            .and_then(|objects| objects.get_mut(&spec.name))
            .ok_or_else(|| ClientError::NotFound {
                name: spec.name.clone(),
            })?;
        object.metadata = spec.metadata;
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, name: &str) -> ClientResult<()> {
        let mut state = self.state.write().await;
        let objects = state
            .buckets
            .get_mut(bucket)
            .ok_or_else(|| ClientError::NotFound {
                name: bucket.to_owned(),
            })?;
        objects.remove(name).ok_or_else(|| ClientError::NotFound {
            name: name.to_owned(),
        })?;
        Ok(())
    }

    fn list_objects(&self, bucket: &str, prefix: Option<String>) -> ObjectStream {
        let state = self.state.clone();
        let bucket = bucket.to_owned();
        stream::once(async move {
            let state = state.read().await;
            let Some(objects) = state.buckets.get(&bucket) else {
                return vec![Err(ClientError::NotFound { name: bucket })];
            };
            objects
                .iter()
                .filter(|(name, _)| {
                    prefix
                        .as_deref()
                        .map_or(true, |prefix| name.starts_with(prefix))
                })
                .map(|(name, object)| Ok(record(&bucket, name, object)))
                .collect::<Vec<_>>()
        })
        .flat_map(stream::iter)
        .boxed()
    }

    async fn read_media(&self, link: &str) -> ClientResult<ByteStream> {
        let not_found = || ClientError::NotFound {
            name: link.to_owned(),
        };
        let rest = link.strip_prefix(MEDIA_SCHEME).ok_or_else(not_found)?;
        let (bucket, name) = rest.split_once('/').ok_or_else(not_found)?;

        let state = self.state.read().await;
        let data = state
            .buckets
            .get(bucket)
            .and_then(|objects| objects.get(name))
            .map(|object| object.data.clone())
            .ok_or_else(not_found)?;

        let mut chunks = Vec::new();
        let mut offset = 0;
        while offset < data.len() {
            let end = (offset + MEDIA_CHUNK).min(data.len());
            chunks.push(Ok(data.slice(offset..end)));
            offset = end;
        }
        Ok(stream::iter(chunks).boxed())
    }
}
