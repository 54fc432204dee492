use super::backend::AccountBackend;
use crate::error::{Result, UserMgrError};
use crate::model::UserRecord;
use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// In-memory account backend for testing.
///
/// Uses `RefCell`/`Cell` for interior mutability since the manager is single-threaded.
/// Writing or removing a record bumps the directory mtime the way a real
/// filesystem would; tests can also set it directly.
pub struct MemBackend {
    records: RefCell<BTreeMap<String, UserRecord>>,
    modified: Cell<Option<DateTime<Utc>>>,
    scans: Cell<usize>,
    simulate_delete_error: Cell<bool>,
}

impl Default for MemBackend {
    fn default() -> Self {
        Self {
            records: RefCell::new(BTreeMap::new()),
            modified: Cell::new(Some(Utc::now())),
            scans: Cell::new(0),
            simulate_delete_error: Cell::new(false),
        }
    }
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose accounts directory does not exist.
    pub fn absent() -> Self {
        let backend = Self::default();
        backend.modified.set(None);
        backend
    }

    pub fn insert(&self, record: UserRecord) {
        self.records
            .borrow_mut()
            .insert(record.username.clone(), record);
        self.touch();
    }

    /// Test helper to set the directory mtime directly for staleness testing.
    pub fn set_modified(&self, modified: DateTime<Utc>) {
        self.modified.set(Some(modified));
    }

    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified.get()
    }

    /// How many times the directory has been enumerated.
    pub fn scan_count(&self) -> usize {
        self.scans.get()
    }

    /// Enable delete error simulation for testing error handling.
    pub fn set_simulate_delete_error(&self, simulate: bool) {
        self.simulate_delete_error.set(simulate);
    }

    fn touch(&self) {
        if self.modified.get().is_some() {
            let now = Utc::now();
            // Keep strictly increasing even when the clock does not move between calls.
            let next = match self.modified.get() {
                Some(prev) if prev >= now => prev + chrono::Duration::milliseconds(1),
                _ => now,
            };
            self.modified.set(Some(next));
        }
    }
}

impl AccountBackend for MemBackend {
    fn directory_modified(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.modified.get())
    }

    fn list_usernames(&self) -> Result<Vec<String>> {
        self.scans.set(self.scans.get() + 1);
        if self.modified.get().is_none() {
            return Ok(Vec::new());
        }
        Ok(self.records.borrow().keys().cloned().collect())
    }

    fn load(&self, username: &str) -> Result<Option<UserRecord>> {
        Ok(self.records.borrow().get(username).cloned())
    }

    fn exists(&self, username: &str) -> bool {
        self.records.borrow().contains_key(username)
    }

    fn delete(&self, username: &str) -> Result<()> {
        if self.simulate_delete_error.get() {
            return Err(UserMgrError::Api("Simulated delete error".to_string()));
        }
        self.records.borrow_mut().remove(username);
        self.touch();
        Ok(())
    }
}
