//! Contract binder - validates a candidate adapter and wraps its operations
//!
//! Binding performs the structural check once: every port operation must be
//! present, callable, and (when the adapter declares shapes) compatible with
//! the contract. Each bound operation then performs the behavioral check on
//! every call: arguments before the adapter runs, the resolved result after.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::contract::{kind_of, ContractSchema, Operation, OperationSignature};

use super::env::AdapterEnv;
use super::error::{BindError, CallError, SignatureSide};
use super::table::{AdapterTable, Member, OperationFn};
use super::types::{Ack, CreateIndex, DocRef, DocReply, IndexDoc, Query, QueryReply, UpdateDoc};

/// Bind a candidate adapter to the search port
///
/// Members are checked in contract order and the first failure is returned.
/// Members that are not port operations are ignored. `env` is kept as is.
pub fn bind(candidate: impl Into<AdapterTable>, env: AdapterEnv) -> Result<SearchPort, BindError> {
    let table = candidate.into();
    let schema = ContractSchema::search_port();

    let operations = schema
        .iter()
        .map(|signature| bind_operation(&table, signature))
        .collect::<Result<Vec<_>, _>>()?;

    for name in table.member_names() {
        if schema.lookup(name).is_none() {
            debug!("Ignoring member '{}' of adapter '{}'", name, table.name());
        }
    }

    debug!(
        "Bound adapter '{}' ({} operations)",
        table.name(),
        operations.len()
    );

    Ok(SearchPort {
        inner: Arc::new(PortInner {
            adapter: table.name().to_string(),
            env,
            operations,
        }),
    })
}

fn bind_operation(
    table: &AdapterTable,
    signature: &'static OperationSignature,
) -> Result<BoundOperation, BindError> {
    let operation = signature.operation;
    let adapter = || table.name().to_string();

    match table.member(operation.name()) {
        None => Err(BindError::MissingOperation {
            adapter: adapter(),
            operation,
        }),
        Some(Member::Value(value)) => Err(BindError::NotCallable {
            adapter: adapter(),
            operation,
            found: kind_of(value),
        }),
        Some(Member::Operation { handler, declared }) => {
            if let Some(declared) = declared {
                let sides = [
                    (SignatureSide::Args, &declared.args, &signature.args),
                    (SignatureSide::Result, &declared.result, &signature.result),
                ];
                for (side, declared, expected) in sides {
                    // Handlers must accept every contract argument and only
                    // produce contract results
                    let fits = match side {
                        SignatureSide::Args => expected.fits_within(declared),
                        SignatureSide::Result => declared.fits_within(expected),
                    };
                    if !fits {
                        return Err(BindError::IncompatibleShape {
                            adapter: adapter(),
                            operation,
                            side,
                            declared: declared.clone(),
                            expected: expected.clone(),
                        });
                    }
                }
            }
            Ok(BoundOperation {
                signature,
                handler: Arc::clone(handler),
            })
        }
    }
}

/// One port operation wrapped with argument and result validation
#[derive(Clone)]
pub struct BoundOperation {
    signature: &'static OperationSignature,
    handler: OperationFn,
}

impl BoundOperation {
    pub fn signature(&self) -> &'static OperationSignature {
        self.signature
    }

    /// Validate `args`, run the adapter once, validate and return its result
    pub async fn invoke(&self, args: Value) -> Result<Value, CallError> {
        let operation = self.signature.operation;

        if let Err(mismatch) = self.signature.args.validate(&args) {
            debug!("Rejected arguments for {}: {}", operation, mismatch);
            return Err(CallError::InvalidArguments {
                operation,
                mismatch,
            });
        }

        let result = (self.handler)(args)
            .await
            .map_err(|source| CallError::Adapter { operation, source })?;

        if let Err(mismatch) = self.signature.result.validate(&result) {
            debug!("Rejected result of {}: {}", operation, mismatch);
            return Err(CallError::InvalidResult {
                operation,
                mismatch,
            });
        }

        Ok(result)
    }
}

impl fmt::Debug for BoundOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundOperation")
            .field("operation", &self.signature.operation)
            .finish_non_exhaustive()
    }
}

/// A validated adapter; the only access point to it after binding
///
/// Cheap to clone. Clones share the same adapter handlers.
#[derive(Clone)]
pub struct SearchPort {
    inner: Arc<PortInner>,
}

struct PortInner {
    adapter: String,
    env: AdapterEnv,
    /// Indexed by `Operation::index`
    operations: Vec<BoundOperation>,
}

impl fmt::Debug for SearchPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchPort")
            .field("adapter", &self.inner.adapter)
            .field("env", &self.inner.env)
            .finish_non_exhaustive()
    }
}

impl SearchPort {
    pub fn adapter_name(&self) -> &str {
        &self.inner.adapter
    }

    pub fn env(&self) -> &AdapterEnv {
        &self.inner.env
    }

    pub fn operation(&self, operation: Operation) -> &BoundOperation {
        &self.inner.operations[operation.index()]
    }

    /// Invoke an operation with raw JSON arguments
    pub async fn call(&self, operation: Operation, args: Value) -> Result<Value, CallError> {
        self.operation(operation).invoke(args).await
    }

    async fn call_typed<A, R>(&self, operation: Operation, args: &A) -> Result<R, CallError>
    where
        A: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let args =
            serde_json::to_value(args).map_err(|source| CallError::Codec { operation, source })?;
        let result = self.call(operation, args).await?;
        serde_json::from_value(result).map_err(|source| CallError::Codec { operation, source })
    }

    pub async fn create_index(&self, args: &CreateIndex) -> Result<Ack, CallError> {
        self.call_typed(Operation::CreateIndex, args).await
    }

    pub async fn delete_index(&self, index: &str) -> Result<Ack, CallError> {
        self.call_typed(Operation::DeleteIndex, index).await
    }

    /// Index a document under `args.key`
    ///
    /// Any cached query whose identity equals the key is stale afterwards;
    /// invalidating it is up to the caller.
    pub async fn index_doc(&self, args: &IndexDoc) -> Result<Ack, CallError> {
        self.call_typed(Operation::IndexDoc, args).await
    }

    pub async fn update_doc(&self, args: &UpdateDoc) -> Result<Ack, CallError> {
        self.call_typed(Operation::UpdateDoc, args).await
    }

    pub async fn get_doc(&self, args: &DocRef) -> Result<DocReply, CallError> {
        self.call_typed(Operation::GetDoc, args).await
    }

    pub async fn remove_doc(&self, args: &DocRef) -> Result<Ack, CallError> {
        self.call_typed(Operation::RemoveDoc, args).await
    }

    pub async fn query(&self, args: &Query) -> Result<QueryReply, CallError> {
        self.call_typed(Operation::Query, args).await
    }
}
