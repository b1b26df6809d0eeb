//! Adapter module - bundled search adapters

mod memory;

pub use memory::MemoryAdapter;

use std::str::FromStr;
use std::sync::Arc;

use crate::port::{AdapterEnv, AdapterTable};

/// Adapters shipped with this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterKind {
    Memory,
}

impl AdapterKind {
    /// Build the candidate table for this adapter from its environment
    pub fn build(self, env: &AdapterEnv) -> anyhow::Result<AdapterTable> {
        match self {
            AdapterKind::Memory => {
                let adapter = MemoryAdapter::from_env(env)?;
                Ok(AdapterTable::from_adapter(Arc::new(adapter)))
            }
        }
    }
}

impl FromStr for AdapterKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(AdapterKind::Memory),
            _ => anyhow::bail!("Unknown adapter: {}. Available adapters: memory", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!("memory".parse::<AdapterKind>().unwrap(), AdapterKind::Memory);
        let err = "elastic".parse::<AdapterKind>().unwrap_err().to_string();
        assert!(err.contains("Unknown adapter"));
    }

    #[test]
    fn test_build_memory_table() {
        let table = AdapterKind::Memory.build(&AdapterEnv::default()).unwrap();
        assert_eq!(table.name(), "memory");
        assert_eq!(table.member_names().count(), 7);
    }
}
