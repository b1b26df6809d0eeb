//! Port module - binding adapters to the search port

mod binder;
mod env;
mod error;
mod table;
mod traits;
mod types;

pub use binder::{bind, BoundOperation, SearchPort};
pub use env::AdapterEnv;
pub use error::{BindError, CallError, SignatureSide};
pub use table::{AdapterTable, DeclaredSignature, Member, OperationFn, OperationFuture};
pub use traits::SearchAdapter;
pub use types::{Ack, CreateIndex, DocRef, DocReply, IndexDoc, Query, QueryReply, UpdateDoc};
