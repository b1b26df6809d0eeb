//! In-memory reference adapter
//!
//! Keeps indexes in process memory. Matching is deliberately naive (substring
//! or field equality, no ranking); this adapter exists to exercise the port in
//! tests and from the CLI, not to search well.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::info;

use crate::capture::{ack, capture_async};
use crate::port::{AdapterEnv, CreateIndex, DocRef, IndexDoc, Query, SearchAdapter, UpdateDoc};

/// Document fields that may carry the key of an updated document
const KEY_FIELDS: [&str; 3] = ["key", "id", "_id"];

/// Documents of one index, in key order. Mappings are accepted and ignored.
#[derive(Debug, Default)]
struct MemoryIndex {
    docs: BTreeMap<String, Value>,
}

/// In-memory search adapter
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    indexes: RwLock<HashMap<String, MemoryIndex>>,
    max_matches: Option<usize>,
}

impl MemoryAdapter {
    /// Create an empty adapter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an adapter configured from its environment
    ///
    /// Recognised keys: `max_matches` (cap on query results).
    pub fn from_env(env: &AdapterEnv) -> anyhow::Result<Self> {
        let max_matches = match env.get("max_matches") {
            None | Some(Value::Null) => None,
            Some(v) => {
                let max = v
                    .as_u64()
                    .ok_or_else(|| anyhow::anyhow!("max_matches must be a non-negative integer"))?;
                Some(usize::try_from(max)?)
            }
        };

        info!(
            "Initialized memory adapter (max_matches: {})",
            max_matches.map_or_else(|| "unlimited".to_string(), |n| n.to_string())
        );

        Ok(Self {
            indexes: RwLock::new(HashMap::new()),
            max_matches,
        })
    }

    async fn write_doc(&self, args: IndexDoc) -> anyhow::Result<()> {
        let mut indexes = self.indexes.write().await;
        let index = indexes
            .get_mut(&args.index)
            .ok_or_else(|| anyhow::anyhow!("index '{}' does not exist", args.index))?;
        index.docs.insert(args.key, args.doc);
        Ok(())
    }

    async fn merge_doc(&self, args: UpdateDoc) -> anyhow::Result<()> {
        let key = document_key(&args.doc)
            .ok_or_else(|| anyhow::anyhow!("document has no key, id or _id field"))?;

        let mut indexes = self.indexes.write().await;
        let index = indexes
            .get_mut(&args.index)
            .ok_or_else(|| anyhow::anyhow!("index '{}' does not exist", args.index))?;
        let existing = index
            .docs
            .get_mut(&key)
            .ok_or_else(|| anyhow::anyhow!("document '{}' not found", key))?;

        match (existing, args.doc) {
            (Value::Object(current), Value::Object(patch)) => current.extend(patch),
            (existing, doc) => *existing = doc,
        }
        Ok(())
    }
}

/// Key of a document, taken from its first string key field
fn document_key(doc: &Value) -> Option<String> {
    KEY_FIELDS
        .iter()
        .find_map(|field| doc.get(*field).and_then(Value::as_str))
        .map(str::to_string)
}

/// Whether a document matches a query value
fn matches(doc: &Value, q: &Value) -> bool {
    match q {
        Value::Null => true,
        Value::String(text) => doc
            .to_string()
            .to_lowercase()
            .contains(&text.to_lowercase()),
        Value::Object(fields) => fields.iter().all(|(k, v)| doc.get(k) == Some(v)),
        other => doc == other,
    }
}

#[async_trait]
impl SearchAdapter for MemoryAdapter {
    fn name(&self) -> &str {
        "memory"
    }

    async fn create_index(&self, args: Value) -> anyhow::Result<Value> {
        let args: CreateIndex = serde_json::from_value(args)?;
        let result = capture_async(async {
            let mut indexes = self.indexes.write().await;
            if indexes.contains_key(&args.index) {
                anyhow::bail!("index '{}' already exists", args.index);
            }
            indexes.insert(args.index.clone(), MemoryIndex::default());
            Ok(())
        })
        .await;
        Ok(ack(result))
    }

    async fn delete_index(&self, args: Value) -> anyhow::Result<Value> {
        let index: String = serde_json::from_value(args)?;
        let removed = self.indexes.write().await.remove(&index).is_some();
        Ok(if removed {
            json!({"ok": true})
        } else {
            json!({"ok": false, "msg": format!("index '{}' does not exist", index)})
        })
    }

    async fn index_doc(&self, args: Value) -> anyhow::Result<Value> {
        let args: IndexDoc = serde_json::from_value(args)?;
        Ok(ack(capture_async(self.write_doc(args)).await))
    }

    async fn update_doc(&self, args: Value) -> anyhow::Result<Value> {
        let args: UpdateDoc = serde_json::from_value(args)?;
        Ok(ack(capture_async(self.merge_doc(args)).await))
    }

    async fn get_doc(&self, args: Value) -> anyhow::Result<Value> {
        let args: DocRef = serde_json::from_value(args)?;
        let indexes = self.indexes.read().await;
        let doc = indexes
            .get(&args.index)
            .and_then(|index| index.docs.get(&args.key));

        Ok(match doc {
            Some(doc) => json!({"ok": true, "key": args.key, "doc": doc}),
            None => json!({"ok": false, "key": args.key, "doc": null}),
        })
    }

    async fn remove_doc(&self, args: Value) -> anyhow::Result<Value> {
        let args: DocRef = serde_json::from_value(args)?;
        let mut indexes = self.indexes.write().await;
        let removed = indexes
            .get_mut(&args.index)
            .and_then(|index| index.docs.remove(&args.key));

        Ok(match removed {
            Some(_) => json!({"ok": true}),
            None => json!({
                "ok": false,
                "msg": format!("document '{}' not found in '{}'", args.key, args.index),
            }),
        })
    }

    async fn query(&self, args: Value) -> anyhow::Result<Value> {
        let args: Query = serde_json::from_value(args)?;
        let indexes = self.indexes.read().await;
        let Some(index) = indexes.get(&args.index) else {
            return Ok(json!({"ok": false, "matches": []}));
        };

        let limit = self.max_matches.unwrap_or(usize::MAX);
        let found: Vec<&Value> = index
            .docs
            .values()
            .filter(|doc| matches(doc, &args.q))
            .take(limit)
            .collect();

        Ok(json!({"ok": true, "matches": found}))
    }
}
