use crate::error::Result;
use crate::model::UserRecord;
use chrono::{DateTime, Utc};

/// Abstract interface for raw account I/O.
/// This trait handles the "how" of reaching account records (filesystem vs memory),
/// while UserStore handles the "what" (caching, staleness, delete bookkeeping).
pub trait AccountBackend {
    // --- Directory ---

    /// Modification time of the accounts directory.
    /// Returns Ok(None) when the directory is unresolved or does not exist.
    fn directory_modified(&self) -> Result<Option<DateTime<Utc>>>;

    /// Usernames of every record file in the directory, in directory order.
    /// An absent directory yields an empty list.
    fn list_usernames(&self) -> Result<Vec<String>>;

    // --- Records ---

    /// Load one record. Returns Ok(None) if there is no backing file.
    fn load(&self, username: &str) -> Result<Option<UserRecord>>;

    /// Whether the backing file for `username` exists.
    fn exists(&self, username: &str) -> bool;

    /// Remove the backing file.
    fn delete(&self, username: &str) -> Result<()>;
}
