use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire form of an archived saga payload: the concrete type's stable tag next
/// to its serialized body, so readers can dispatch on the tag instead of
/// guessing at the shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEnvelope {
    pub kind: String,
    pub data: Value,
}
