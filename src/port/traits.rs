//! Search adapter trait

use async_trait::async_trait;
use serde_json::Value;

use crate::contract::Operation;

/// Trait for search backend adapters
///
/// Implementing this trait guarantees structurally that every port operation
/// exists. Arguments are handed over only after they matched the operation's
/// argument shape; returned values are checked against its result shape.
///
/// Business failures belong in the reply (`{"ok": false, "msg": ...}`).
/// Returning `Err` is an adapter fault and reaches the caller as such.
#[async_trait]
pub trait SearchAdapter: Send + Sync {
    /// Name used in logs and binding errors
    fn name(&self) -> &str;

    /// `{index, mappings}` -> `{ok, msg?}`
    async fn create_index(&self, args: Value) -> anyhow::Result<Value>;

    /// `index` -> `{ok, msg?}`
    async fn delete_index(&self, args: Value) -> anyhow::Result<Value>;

    /// `{index, key, doc}` -> `{ok, msg?}`
    async fn index_doc(&self, args: Value) -> anyhow::Result<Value>;

    /// `{index, doc}` -> `{ok, msg?}`
    async fn update_doc(&self, args: Value) -> anyhow::Result<Value>;

    /// `{index, key}` -> `{ok, key, doc}`
    async fn get_doc(&self, args: Value) -> anyhow::Result<Value>;

    /// `{index, key}` -> `{ok, msg?}`
    async fn remove_doc(&self, args: Value) -> anyhow::Result<Value>;

    /// `{index, q}` -> `{ok, matches}`
    async fn query(&self, args: Value) -> anyhow::Result<Value>;
}

/// Route an operation to the matching trait method
pub(crate) async fn dispatch<A>(adapter: &A, operation: Operation, args: Value) -> anyhow::Result<Value>
where
    A: SearchAdapter + ?Sized,
{
    match operation {
        Operation::CreateIndex => adapter.create_index(args).await,
        Operation::DeleteIndex => adapter.delete_index(args).await,
        Operation::IndexDoc => adapter.index_doc(args).await,
        Operation::UpdateDoc => adapter.update_doc(args).await,
        Operation::GetDoc => adapter.get_doc(args).await,
        Operation::RemoveDoc => adapter.remove_doc(args).await,
        Operation::Query => adapter.query(args).await,
    }
}
