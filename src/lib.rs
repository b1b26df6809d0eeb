//! port-search - a validated search port
//!
//! Declares the operations a search-indexing backend must offer and binds
//! adapters to that contract. Binding checks that every operation exists;
//! each bound operation then checks its arguments before the adapter runs and
//! the adapter's reply before the caller sees it.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use port_search::adapter::MemoryAdapter;
//! use port_search::port::{bind, AdapterEnv, DocRef};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let port = bind(Arc::new(MemoryAdapter::new()), AdapterEnv::default())?;
//! let reply = port
//!     .get_doc(&DocRef { index: "books".into(), key: "42".into() })
//!     .await?;
//! println!("found: {}", reply.ok);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod capture;
pub mod cli;
pub mod config;
pub mod contract;
pub mod port;

pub use contract::{ContractSchema, Operation, Shape};
pub use port::{bind, AdapterEnv, AdapterTable, BindError, CallError, SearchAdapter, SearchPort};
