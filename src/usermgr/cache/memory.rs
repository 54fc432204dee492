use super::CacheBackend;
use crate::error::{Result, UserMgrError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory cache for testing. Counts saves so tests can tell a rescan
/// (which persists a fresh snapshot) from a cache hit (which does not).
#[derive(Default)]
pub struct MemoryCache {
    entries: RefCell<HashMap<String, serde_json::Value>>,
    saves: Cell<usize>,
    simulate_fetch_error: Cell<bool>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// Raw access to a stored value, bypassing the fetch counter/error simulation.
    pub fn peek(&self, key: &str) -> Option<serde_json::Value> {
        self.entries.borrow().get(key).cloned()
    }

    /// Overwrite a stored value without counting it as a save.
    pub fn put_raw(&self, key: &str, value: serde_json::Value) {
        self.entries.borrow_mut().insert(key.to_string(), value);
    }

    pub fn set_simulate_fetch_error(&self, simulate: bool) {
        self.simulate_fetch_error.set(simulate);
    }
}

impl CacheBackend for MemoryCache {
    fn fetch(&self, key: &str) -> Result<Option<serde_json::Value>> {
        if self.simulate_fetch_error.get() {
            return Err(UserMgrError::Cache("Simulated fetch error".to_string()));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: serde_json::Value) -> Result<()> {
        self.saves.set(self.saves.get() + 1);
        self.entries.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}
