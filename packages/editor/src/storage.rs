//! Persistence contract.
//!
//! Implementations live outside the core. `load` hands back raw JSON, never a
//! trusted template — callers run it through `sanitize` before use.

use letterpress_parser::Template;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub trait TemplateStore {
    fn save(&mut self, key: &str, template: &Template) -> Result<(), StorageError>;

    /// Raw stored value; whatever comes back is untrusted.
    fn load(&self, key: &str) -> Result<Option<Value>, StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store for tests and temporary documents.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_raw(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TemplateStore for MemoryStore {
    fn save(&mut self, key: &str, template: &Template) -> Result<(), StorageError> {
        let value = serde_json::to_value(template)?;
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}
