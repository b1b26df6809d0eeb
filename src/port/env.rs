//! Opaque adapter environment

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Environment handed to `bind` and kept, unexamined, by the bound port
///
/// Only adapters give it meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdapterEnv(Value);

impl AdapterEnv {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Top-level entry, if the environment is an object
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl Default for AdapterEnv {
    fn default() -> Self {
        Self(Value::Object(Default::default()))
    }
}

impl From<Value> for AdapterEnv {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
