//! # Storage Layer
//!
//! This module owns access to user account records. [`UserStore`] sits between
//! the command layer and two collaborators:
//!
//! - an [`AccountBackend`](backend::AccountBackend) that can enumerate, load and
//!   delete record files in the accounts directory, and
//! - a [`CacheBackend`] holding the last directory scan.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production, one YAML file per account
//! - [`mem_backend::MemBackend`]: in-memory, for testing (counts scans)
//!
//! ## Two-Tier Cache
//!
//! ```text
//! list_records()
//!   ├─ in-process memo populated? ──────────────► memo (first call wins)
//!   ├─ accounts directory missing? ─────────────► empty
//!   ├─ snapshot.modified >= directory mtime? ───► snapshot.users
//!   └─ otherwise: rescan directory, save {mtime, users} ──► users
//! ```
//!
//! The memo is never re-validated during a process run. The persisted snapshot
//! is valid as long as the accounts directory has not been modified after it
//! was taken.
//!
//! ## Delete Patches The Snapshot
//!
//! Deleting a user removes the file, then writes the already loaded mapping
//! minus that user back to the cache, stamped with the directory mtime as it
//! is after the delete. The next process therefore skips the rescan. The
//! price: accounts written by someone else between our listing and the delete
//! stay invisible until the directory changes again.

use crate::cache::{CacheBackend, Snapshot};
use crate::error::{Result, UserMgrError};
use crate::model::Users;
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use tracing::{debug, info, warn};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

use backend::AccountBackend;

/// Cache key of the users snapshot. The only key this crate writes.
pub const CACHE_KEY: &str = "admin-addon-user-manager.users";

pub struct UserStore<B: AccountBackend, C: CacheBackend> {
    backend: B,
    cache: C,
    /// Per-process memo. `RefCell` since the manager is single-threaded.
    memo: RefCell<Option<Users>>,
}

impl<B: AccountBackend, C: CacheBackend> UserStore<B, C> {
    pub fn new(backend: B, cache: C) -> Self {
        Self {
            backend,
            cache,
            memo: RefCell::new(None),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Drop the in-process memo and hand back the collaborators.
    pub fn into_parts(self) -> (B, C) {
        (self.backend, self.cache)
    }

    /// All user records, keyed by username.
    pub fn list_records(&self) -> Result<Users> {
        if let Some(users) = self.memo.borrow().as_ref() {
            debug!(count = users.len(), "users served from memo");
            return Ok(users.clone());
        }

        let users = self.load_users()?;
        *self.memo.borrow_mut() = Some(users.clone());
        Ok(users)
    }

    /// Usernames of all records, in listing order.
    pub fn usernames(&self) -> Result<Vec<String>> {
        Ok(self.list_records()?.into_keys().collect())
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.list_records()?.len())
    }

    /// Delete the record file for `username`.
    ///
    /// Returns `Ok(false)` when there is no such file. On success the memo and
    /// the persisted snapshot are patched in place instead of being rebuilt.
    pub fn delete_record(&self, username: &str) -> Result<bool> {
        validate_username(username)?;

        if !self.backend.exists(username) {
            debug!(username, "no account file, nothing to delete");
            return Ok(false);
        }

        let mut users = self.list_records()?;
        self.backend.delete(username)?;
        users.remove(username);
        *self.memo.borrow_mut() = Some(users.clone());

        if let Some(modified) = self.backend.directory_modified()? {
            self.save_snapshot(users, modified);
        }

        info!(username, "deleted user account");
        Ok(true)
    }

    fn load_users(&self) -> Result<Users> {
        let Some(modified) = self.backend.directory_modified()? else {
            debug!("accounts directory unavailable, listing no users");
            return Ok(Users::new());
        };

        match self.fetch_snapshot() {
            Some(snapshot) if !snapshot.is_stale(modified) => {
                debug!(count = snapshot.users.len(), "users served from cache");
                Ok(snapshot.users)
            }
            _ => {
                let users = self.scan()?;
                debug!(count = users.len(), "rescanned accounts directory");
                self.save_snapshot(users.clone(), modified);
                Ok(users)
            }
        }
    }

    fn scan(&self) -> Result<Users> {
        let mut users = Users::new();
        for username in self.backend.list_usernames()? {
            if let Some(record) = self.backend.load(&username)? {
                users.insert(record.username.clone(), record);
            }
        }
        Ok(users)
    }

    fn fetch_snapshot(&self) -> Option<Snapshot> {
        let value = match self.cache.fetch(CACHE_KEY) {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "users cache unreadable, rescanning");
                return None;
            }
        };

        match Snapshot::decode(value) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, "users cache entry malformed, rescanning");
                None
            }
        }
    }

    /// Cache writes are best effort: a failed save only costs a rescan later.
    fn save_snapshot(&self, users: Users, modified: DateTime<Utc>) {
        let snapshot = Snapshot::new(modified, users);
        let saved = snapshot
            .encode()
            .and_then(|value| self.cache.save(CACHE_KEY, value));
        if let Err(e) = saved {
            warn!(error = %e, "failed to save users cache");
        }
    }
}

/// Usernames become filenames; anything that could leave the accounts directory is refused.
pub(crate) fn validate_username(username: &str) -> Result<()> {
    let invalid = username.trim().is_empty()
        || username.starts_with('.')
        || username.contains(['/', '\\', '\0']);
    if invalid {
        return Err(UserMgrError::InvalidUsername(username.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::memory::MemoryCache;
    use crate::model::UserRecord;
    use chrono::Duration;
    use mem_backend::MemBackend;
    use serde_json::json;

    fn store_with(names: &[&str]) -> UserStore<MemBackend, MemoryCache> {
        let backend = MemBackend::new();
        for name in names {
            backend.insert(UserRecord::new(*name).with_field("email", format!("{name}@example.com")));
        }
        UserStore::new(backend, MemoryCache::new())
    }

    fn cached_usernames(cache: &MemoryCache) -> Vec<String> {
        let snapshot = Snapshot::decode(cache.peek(CACHE_KEY).unwrap()).unwrap();
        snapshot.users.into_keys().collect()
    }

    #[test]
    fn absent_directory_lists_nothing() {
        let store = UserStore::new(MemBackend::absent(), MemoryCache::new());

        let users = store.list_records().unwrap();
        assert!(users.is_empty());
        assert_eq!(store.cache().save_count(), 0);
    }

    #[test]
    fn first_listing_scans_and_persists() {
        let store = store_with(&["bob", "alice"]);

        let users = store.list_records().unwrap();
        assert_eq!(users.keys().collect::<Vec<_>>(), vec!["alice", "bob"]);
        assert_eq!(store.backend().scan_count(), 1);
        assert_eq!(store.cache().save_count(), 1);
        assert_eq!(cached_usernames(store.cache()), vec!["alice", "bob"]);
    }

    #[test]
    fn memo_wins_within_a_process() {
        let store = store_with(&["alice"]);
        store.list_records().unwrap();

        // A new account appears, but this process already has its answer.
        store.backend().insert(UserRecord::new("zed"));
        let users = store.list_records().unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(store.backend().scan_count(), 1);
    }

    #[test]
    fn fresh_snapshot_skips_rescan() {
        let store = store_with(&["alice", "bob"]);
        store.list_records().unwrap();
        let (backend, cache) = store.into_parts();

        let next = UserStore::new(backend, cache);
        let users = next.list_records().unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(next.backend().scan_count(), 1);
        assert_eq!(next.cache().save_count(), 1);
    }

    #[test]
    fn snapshot_content_is_trusted_while_fresh() {
        let backend = MemBackend::new();
        backend.insert(UserRecord::new("alice"));
        let modified = backend.modified().unwrap();

        let cache = MemoryCache::new();
        let mut cached = Users::new();
        cached.insert("ghost".into(), UserRecord::new("ghost"));
        cache.put_raw(
            CACHE_KEY,
            Snapshot::new(modified, cached).encode().unwrap(),
        );

        let store = UserStore::new(backend, cache);
        let users = store.list_records().unwrap();

        assert_eq!(users.keys().collect::<Vec<_>>(), vec!["ghost"]);
        assert_eq!(store.backend().scan_count(), 0);
    }

    #[test]
    fn newer_directory_triggers_rescan() {
        let store = store_with(&["alice"]);
        store.list_records().unwrap();
        let (backend, cache) = store.into_parts();

        backend.insert(UserRecord::new("bob"));
        let next = UserStore::new(backend, cache);
        let users = next.list_records().unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(next.backend().scan_count(), 2);
        assert_eq!(cached_usernames(next.cache()), vec!["alice", "bob"]);
    }

    #[test]
    fn older_directory_keeps_snapshot() {
        let store = store_with(&["alice"]);
        store.list_records().unwrap();
        let (backend, cache) = store.into_parts();

        let earlier = backend.modified().unwrap() - Duration::seconds(30);
        backend.set_modified(earlier);
        let next = UserStore::new(backend, cache);
        next.list_records().unwrap();

        assert_eq!(next.backend().scan_count(), 1);
    }

    #[test]
    fn malformed_snapshot_rescans() {
        let store = store_with(&["alice"]);
        store.cache().put_raw(CACHE_KEY, json!({"users": "not a map"}));

        let users = store.list_records().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(store.backend().scan_count(), 1);
    }

    #[test]
    fn unreadable_cache_rescans() {
        let store = store_with(&["alice"]);
        store.cache().set_simulate_fetch_error(true);

        let users = store.list_records().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(store.backend().scan_count(), 1);
    }

    #[test]
    fn relisting_returns_same_usernames() {
        let store = store_with(&["carol", "alice", "bob"]);
        let first = store.usernames().unwrap();
        let (backend, cache) = store.into_parts();
        let second = UserStore::new(backend, cache).usernames().unwrap();

        assert_eq!(first, vec!["alice", "bob", "carol"]);
        assert_eq!(first, second);
    }

    #[test]
    fn delete_removes_file_memo_and_snapshot_entry() {
        let store = store_with(&["alice", "bob"]);
        store.list_records().unwrap();

        assert!(store.delete_record("alice").unwrap());

        assert!(!store.backend().exists("alice"));
        assert_eq!(store.usernames().unwrap(), vec!["bob"]);
        assert_eq!(cached_usernames(store.cache()), vec!["bob"]);
    }

    #[test]
    fn patched_snapshot_survives_into_next_process() {
        let store = store_with(&["alice", "bob"]);
        store.delete_record("alice").unwrap();
        let (backend, cache) = store.into_parts();

        let next = UserStore::new(backend, cache);
        assert_eq!(next.usernames().unwrap(), vec!["bob"]);
        // One scan for the listing inside delete, none afterwards.
        assert_eq!(next.backend().scan_count(), 1);
    }

    #[test]
    fn delete_missing_user_is_a_noop() {
        let store = store_with(&["alice"]);
        store.list_records().unwrap();
        let saves = store.cache().save_count();

        assert!(!store.delete_record("nobody").unwrap());

        assert_eq!(store.usernames().unwrap(), vec!["alice"]);
        assert_eq!(store.cache().save_count(), saves);
    }

    #[test]
    fn delete_rejects_path_like_usernames() {
        let store = store_with(&["alice"]);

        for name in ["", "  ", "../alice", "a/b", ".hidden", "a\\b"] {
            assert!(
                matches!(store.delete_record(name), Err(UserMgrError::InvalidUsername(_))),
                "accepted {name:?}"
            );
        }
        assert!(store.backend().exists("alice"));
    }

    #[test]
    fn failed_delete_leaves_mapping_alone() {
        let store = store_with(&["alice"]);
        store.list_records().unwrap();
        store.backend().set_simulate_delete_error(true);

        assert!(store.delete_record("alice").is_err());
        assert_eq!(store.usernames().unwrap(), vec!["alice"]);
    }
}
