//! In-memory settings store.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::Result;
use crate::port::SettingsStore;

/// Settings held in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemorySettingsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        self.values.write().insert(key.to_string(), value);
        Ok(())
    }
}
