//! The search port contract
//!
//! Seven asynchronous operations, each with an argument shape and a result
//! shape. The set is closed: adapters cannot add or remove operations.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::Serialize;

use super::shape::Shape;

/// Operations of the search port, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    CreateIndex,
    DeleteIndex,
    /// Callers must invalidate any cached query whose identity equals the
    /// indexed key; nothing in this crate caches queries.
    IndexDoc,
    UpdateDoc,
    GetDoc,
    RemoveDoc,
    Query,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::CreateIndex,
        Operation::DeleteIndex,
        Operation::IndexDoc,
        Operation::UpdateDoc,
        Operation::GetDoc,
        Operation::RemoveDoc,
        Operation::Query,
    ];

    /// Wire name of the operation
    pub fn name(self) -> &'static str {
        match self {
            Operation::CreateIndex => "createIndex",
            Operation::DeleteIndex => "deleteIndex",
            Operation::IndexDoc => "indexDoc",
            Operation::UpdateDoc => "updateDoc",
            Operation::GetDoc => "getDoc",
            Operation::RemoveDoc => "removeDoc",
            Operation::Query => "query",
        }
    }

    /// Position in [`Operation::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown operation '{}'. Expected one of: {}",
                    s,
                    Operation::ALL.map(Operation::name).join(", ")
                )
            })
    }
}

/// Immutable descriptor of one operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationSignature {
    pub operation: Operation,
    pub args: Shape,
    pub result: Shape,
}

/// Ordered operation name -> signature mapping
#[derive(Debug, Serialize)]
pub struct ContractSchema {
    operations: Vec<OperationSignature>,
}

static SEARCH_PORT: LazyLock<ContractSchema> = LazyLock::new(ContractSchema::build_search_port);

impl ContractSchema {
    /// The search port contract
    pub fn search_port() -> &'static ContractSchema {
        &SEARCH_PORT
    }

    fn build_search_port() -> Self {
        let ack = || {
            Shape::object([
                ("ok", Shape::Boolean),
                ("msg", Shape::optional(Shape::String)),
            ])
        };
        let doc_ref = || Shape::object([("index", Shape::String), ("key", Shape::String)]);

        let operations = vec![
            OperationSignature {
                operation: Operation::CreateIndex,
                args: Shape::object([("index", Shape::String), ("mappings", Shape::Any)]),
                result: ack(),
            },
            OperationSignature {
                operation: Operation::DeleteIndex,
                args: Shape::String,
                result: ack(),
            },
            OperationSignature {
                operation: Operation::IndexDoc,
                args: Shape::object([
                    ("index", Shape::String),
                    ("key", Shape::String),
                    ("doc", Shape::Any),
                ]),
                result: ack(),
            },
            OperationSignature {
                operation: Operation::UpdateDoc,
                args: Shape::object([("index", Shape::String), ("doc", Shape::Any)]),
                result: ack(),
            },
            OperationSignature {
                operation: Operation::GetDoc,
                args: doc_ref(),
                result: Shape::object([
                    ("ok", Shape::Boolean),
                    ("key", Shape::String),
                    ("doc", Shape::Any),
                ]),
            },
            OperationSignature {
                operation: Operation::RemoveDoc,
                args: doc_ref(),
                result: ack(),
            },
            OperationSignature {
                operation: Operation::Query,
                args: Shape::object([("index", Shape::String), ("q", Shape::Any)]),
                result: Shape::object([
                    ("ok", Shape::Boolean),
                    ("matches", Shape::array(Shape::Any)),
                ]),
            },
        ];

        Self { operations }
    }

    /// Signature of an operation
    pub fn get(&self, operation: Operation) -> &OperationSignature {
        &self.operations[operation.index()]
    }

    /// Signature by wire name
    pub fn lookup(&self, name: &str) -> Option<&OperationSignature> {
        self.operations.iter().find(|s| s.operation.name() == name)
    }

    /// Signatures in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &OperationSignature> {
        self.operations.iter()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_order_matches_operations() {
        let schema = ContractSchema::search_port();
        assert_eq!(schema.len(), 7);
        for (sig, op) in schema.iter().zip(Operation::ALL) {
            assert_eq!(sig.operation, op);
            assert_eq!(schema.get(op).operation, op);
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let schema = ContractSchema::search_port();
        let sig = schema.lookup("getDoc").unwrap();
        assert_eq!(sig.operation, Operation::GetDoc);
        assert!(schema.lookup("bulkIndex").is_none());
    }

    #[test]
    fn test_operation_from_str() {
        assert_eq!("removeDoc".parse::<Operation>().unwrap(), Operation::RemoveDoc);
        let err = "remove_doc".parse::<Operation>().unwrap_err().to_string();
        assert!(err.contains("Unknown operation"));
        assert!(err.contains("removeDoc"));
    }

    #[test]
    fn test_delete_index_takes_bare_string() {
        let sig = ContractSchema::search_port().get(Operation::DeleteIndex);
        assert!(sig.args.validate(&json!("books")).is_ok());
        assert!(sig.args.validate(&json!({"index": "books"})).is_err());
    }

    #[test]
    fn test_get_doc_shapes() {
        let sig = ContractSchema::search_port().get(Operation::GetDoc);
        assert!(sig.args.validate(&json!({"index": 123, "key": "k"})).is_err());
        assert!(sig
            .result
            .validate(&json!({"ok": true, "key": "42", "doc": {"title": "Dune"}}))
            .is_ok());
    }

    #[test]
    fn test_query_requires_matches() {
        let sig = ContractSchema::search_port().get(Operation::Query);
        let err = sig.result.validate(&json!({"ok": true})).unwrap_err();
        assert_eq!(err.path, "$.matches");
    }

    #[test]
    fn test_schema_serializes() {
        let json = serde_json::to_value(ContractSchema::search_port()).unwrap();
        assert_eq!(json["operations"][0]["operation"], "createIndex");
        assert_eq!(json["operations"][1]["args"]["type"], "string");
    }
}
