//! Typed arguments and replies of the search port

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `createIndex` arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIndex {
    pub index: String,
    #[serde(default)]
    pub mappings: Value,
}

/// `indexDoc` arguments
///
/// Indexing under a key that doubles as a cached query identity requires the
/// caller to drop that cached query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexDoc {
    pub index: String,
    pub key: String,
    #[serde(default)]
    pub doc: Value,
}

/// `updateDoc` arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDoc {
    pub index: String,
    #[serde(default)]
    pub doc: Value,
}

/// `getDoc` and `removeDoc` arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocRef {
    pub index: String,
    pub key: String,
}

/// `query` arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    pub index: String,
    #[serde(default)]
    pub q: Value,
}

/// Reply of write and delete operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl Ack {
    pub fn ok() -> Self {
        Self { ok: true, msg: None }
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            msg: Some(msg.into()),
        }
    }
}

/// Reply of `getDoc`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocReply {
    pub ok: bool,
    pub key: String,
    #[serde(default)]
    pub doc: Value,
}

/// Reply of `query`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryReply {
    pub ok: bool,
    pub matches: Vec<Value>,
}
