//! Binding and call errors

use thiserror::Error;

use crate::contract::{Operation, Shape, ShapeMismatch};

/// Which side of a signature a declared shape disagreed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureSide {
    Args,
    Result,
}

impl std::fmt::Display for SignatureSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignatureSide::Args => f.write_str("argument"),
            SignatureSide::Result => f.write_str("result"),
        }
    }
}

/// A candidate adapter does not satisfy the port. No instance is produced.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("adapter '{adapter}' is missing operation '{operation}'")]
    MissingOperation { adapter: String, operation: Operation },

    #[error("adapter '{adapter}' member '{operation}' is not callable (found {found})")]
    NotCallable {
        adapter: String,
        operation: Operation,
        found: &'static str,
    },

    #[error(
        "adapter '{adapter}' operation '{operation}' declares {side} shape {declared}, expected {expected}"
    )]
    IncompatibleShape {
        adapter: String,
        operation: Operation,
        side: SignatureSide,
        declared: Shape,
        expected: Shape,
    },
}

impl BindError {
    /// The operation the candidate failed on
    pub fn operation(&self) -> Operation {
        match self {
            BindError::MissingOperation { operation, .. }
            | BindError::NotCallable { operation, .. }
            | BindError::IncompatibleShape { operation, .. } => *operation,
        }
    }
}

/// Failure of a single call on a bound port
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidArguments` | Call data does not match the argument shape; the adapter is not invoked |
/// | `InvalidResult` | The adapter resolved a value that does not match the result shape |
/// | `Adapter` | The adapter itself returned an error |
/// | `Codec` | Typed arguments or results could not be converted to or from JSON |
///
/// `{ok: false}` replies are not errors; they come back as successful results.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("invalid arguments for '{operation}': {mismatch}")]
    InvalidArguments {
        operation: Operation,
        mismatch: ShapeMismatch,
    },

    #[error("adapter returned an invalid result for '{operation}': {mismatch}")]
    InvalidResult {
        operation: Operation,
        mismatch: ShapeMismatch,
    },

    #[error("adapter failed during '{operation}'")]
    Adapter {
        operation: Operation,
        #[source]
        source: anyhow::Error,
    },

    #[error("could not convert data for '{operation}'")]
    Codec {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },
}

impl CallError {
    pub fn operation(&self) -> Operation {
        match self {
            CallError::InvalidArguments { operation, .. }
            | CallError::InvalidResult { operation, .. }
            | CallError::Adapter { operation, .. }
            | CallError::Codec { operation, .. } => *operation,
        }
    }

    /// Argument or result validation failure, as opposed to an adapter fault
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            CallError::InvalidArguments { .. } | CallError::InvalidResult { .. }
        )
    }

    /// The mismatch behind a validation failure
    pub fn mismatch(&self) -> Option<&ShapeMismatch> {
        match self {
            CallError::InvalidArguments { mismatch, .. }
            | CallError::InvalidResult { mismatch, .. } => Some(mismatch),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_names_operation() {
        let err = BindError::MissingOperation {
            adapter: "stub".to_string(),
            operation: Operation::RemoveDoc,
        };
        assert_eq!(err.operation(), Operation::RemoveDoc);
        assert_eq!(
            err.to_string(),
            "adapter 'stub' is missing operation 'removeDoc'"
        );
    }

    #[test]
    fn test_adapter_fault_keeps_source() {
        let err = CallError::Adapter {
            operation: Operation::Query,
            source: anyhow::anyhow!("connection refused"),
        };
        assert!(!err.is_contract_violation());
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "connection refused");
    }
}
