//! Adapter tables - the untyped form of a candidate adapter
//!
//! A table maps member names to members. Tables built from a
//! [`SearchAdapter`] always hold all seven operations; hand-assembled tables
//! may not, which is what binding checks for.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::Value;

use crate::contract::{Operation, Shape};

use super::traits::{dispatch, SearchAdapter};

/// Boxed future returned by an operation handler
pub type OperationFuture = BoxFuture<'static, anyhow::Result<Value>>;

/// Shared, type-erased operation handler
pub type OperationFn = Arc<dyn Fn(Value) -> OperationFuture + Send + Sync>;

/// Argument and result shapes an adapter claims for one of its operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredSignature {
    pub args: Shape,
    pub result: Shape,
}

/// A single member of a candidate
#[derive(Clone)]
pub enum Member {
    Operation {
        handler: OperationFn,
        declared: Option<DeclaredSignature>,
    },
    /// Plain data; never callable
    Value(Value),
}

impl std::fmt::Debug for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Member::Operation { declared, .. } => f
                .debug_struct("Operation")
                .field("declared", declared)
                .finish_non_exhaustive(),
            Member::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// Candidate adapter as a name -> member map
#[derive(Debug, Clone)]
pub struct AdapterTable {
    name: String,
    members: HashMap<String, Member>,
}

impl AdapterTable {
    /// Create an empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: HashMap::new(),
        }
    }

    /// Build a table holding every operation of a trait adapter
    pub fn from_adapter<A>(adapter: Arc<A>) -> Self
    where
        A: SearchAdapter + ?Sized + 'static,
    {
        let mut table = Self::new(adapter.name());
        for operation in Operation::ALL {
            let adapter = Arc::clone(&adapter);
            table = table.operation(operation.name(), move |args| {
                let adapter = Arc::clone(&adapter);
                async move { dispatch(&*adapter, operation, args).await }
            });
        }
        table
    }

    /// Add an operation handler
    pub fn operation<F, Fut>(self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        self.insert(name, erase(handler), None)
    }

    /// Add an operation handler together with the shapes it claims to use
    pub fn declared_operation<F, Fut>(
        self,
        name: impl Into<String>,
        declared: DeclaredSignature,
        handler: F,
    ) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        self.insert(name, erase(handler), Some(declared))
    }

    /// Add a non-callable data member
    pub fn value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.members.insert(name.into(), Member::Value(value));
        self
    }

    /// Drop a member
    pub fn without(mut self, name: &str) -> Self {
        self.members.remove(name);
        self
    }

    fn insert(
        mut self,
        name: impl Into<String>,
        handler: OperationFn,
        declared: Option<DeclaredSignature>,
    ) -> Self {
        self.members
            .insert(name.into(), Member::Operation { handler, declared });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    /// Member names, in no particular order
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }
}

impl<A> From<Arc<A>> for AdapterTable
where
    A: SearchAdapter + 'static,
{
    fn from(adapter: Arc<A>) -> Self {
        AdapterTable::from_adapter(adapter)
    }
}

fn erase<F, Fut>(handler: F) -> OperationFn
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
{
    Arc::new(move |args| handler(args).boxed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_handler_roundtrip() {
        let table = AdapterTable::new("stub")
            .operation("deleteIndex", |args| async move { Ok(json!({"ok": args == "books"})) });

        let Some(Member::Operation { handler, declared }) = table.member("deleteIndex") else {
            panic!("expected an operation member");
        };
        assert!(declared.is_none());
        let reply = handler(json!("books")).await.unwrap();
        assert_eq!(reply, json!({"ok": true}));
    }

    #[test]
    fn test_value_and_without() {
        let table = AdapterTable::new("stub")
            .value("query", json!("not a function"))
            .value("version", json!(2))
            .without("version");

        assert!(matches!(table.member("query"), Some(Member::Value(_))));
        assert!(table.member("version").is_none());
        assert_eq!(table.member_names().count(), 1);
    }
}
