//! Contract module - the declared search port and its shapes

mod schema;
mod shape;

pub use schema::{ContractSchema, Operation, OperationSignature};
pub use shape::{kind_of, Field, Shape, ShapeMismatch};
