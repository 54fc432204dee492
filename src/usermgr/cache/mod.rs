//! # Persisted Cache
//!
//! The record store keeps a snapshot of the last directory scan in a generic
//! key/value cache so later processes can skip the rescan. The cache itself is
//! a dumb collaborator: it only has to `fetch` and `save` JSON values by key.
//!
//! ## Implementations
//!
//! - [`file::FileCache`]: one JSON file per key in a cache directory
//!   (atomic write via tmp file + rename)
//! - [`memory::MemoryCache`]: `RefCell`-backed map for tests
//!
//! ## Snapshot Format
//!
//! Records hold arbitrary YAML (tags, integer or sequence keys) that a JSON
//! document cannot carry, so the snapshot is stored as a single JSON string
//! holding a YAML document:
//!
//! ```text
//! modified: 2026-10-19T08:12:44.118Z   # accounts directory mtime at scan time
//! users:
//!   alice:
//!     email: alice@example.com
//!     codes: {1: one}
//! ```

use crate::error::{Result, UserMgrError};
use crate::model::{UserRecord, Users};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod file;
pub mod memory;

/// Minimal get/set contract of a persisted cache.
pub trait CacheBackend {
    /// Value stored under `key`, if any.
    fn fetch(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Store `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: serde_json::Value) -> Result<()>;
}

/// A directory scan frozen at the directory's modification time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub modified: DateTime<Utc>,
    pub users: Users,
}

/// On-disk shape: fields per username, without the flattened record layout.
#[derive(Serialize, Deserialize)]
struct StoredSnapshot {
    modified: DateTime<Utc>,
    users: BTreeMap<String, BTreeMap<String, serde_yaml::Value>>,
}

impl Snapshot {
    pub fn new(modified: DateTime<Utc>, users: Users) -> Self {
        Self { modified, users }
    }

    /// A snapshot is stale once the directory has been modified after it was taken.
    pub fn is_stale(&self, directory_modified: DateTime<Utc>) -> bool {
        directory_modified > self.modified
    }

    /// Cache value for this snapshot.
    pub fn encode(&self) -> Result<serde_json::Value> {
        let stored = StoredSnapshot {
            modified: self.modified,
            users: self
                .users
                .iter()
                .map(|(name, record)| (name.clone(), record.fields.clone()))
                .collect(),
        };
        Ok(serde_json::Value::String(serde_yaml::to_string(&stored)?))
    }

    /// Inverse of [`Snapshot::encode`].
    pub fn decode(value: serde_json::Value) -> Result<Self> {
        let serde_json::Value::String(document) = value else {
            return Err(UserMgrError::Cache(
                "snapshot is not a YAML document".to_string(),
            ));
        };
        let stored: StoredSnapshot = serde_yaml::from_str(&document)?;
        let users = stored
            .users
            .into_iter()
            .map(|(name, fields)| (name.clone(), UserRecord::from_fields(name, fields)))
            .collect();
        Ok(Self::new(stored.modified, users))
    }
}
