use crate::cache::CacheBackend;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::AccountBackend;
use crate::store::UserStore;

/// Delete `username` and send the caller back to `referrer`.
///
/// A missing account is not an error: the result carries a warning and no
/// redirect, and nothing is touched.
pub fn run<B: AccountBackend, C: CacheBackend>(
    store: &UserStore<B, C>,
    username: &str,
    referrer: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if store.delete_record(username)? {
        result.add_message(CmdMessage::success(format!("User deleted: {}", username)));
        result.affected_users.push(username.to_string());
        Ok(result.with_redirect(referrer))
    } else {
        result.add_message(CmdMessage::warning(format!("No such user: {}", username)));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::memory::MemoryCache;
    use crate::commands::MessageLevel;
    use crate::error::UserMgrError;
    use crate::model::UserRecord;
    use crate::store::mem_backend::MemBackend;

    fn store() -> UserStore<MemBackend, MemoryCache> {
        let backend = MemBackend::new();
        backend.insert(UserRecord::new("alice"));
        backend.insert(UserRecord::new("bob"));
        UserStore::new(backend, MemoryCache::new())
    }

    #[test]
    fn deletes_and_redirects_to_referrer() {
        let store = store();
        let result = run(&store, "alice", "/admin/user-manager?page=2").unwrap();

        assert_eq!(result.redirect.as_deref(), Some("/admin/user-manager?page=2"));
        assert_eq!(result.affected_users, vec!["alice"]);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(store.usernames().unwrap(), vec!["bob"]);
    }

    #[test]
    fn missing_user_warns_without_redirect() {
        let store = store();
        let result = run(&store, "nobody", "/admin/user-manager").unwrap();

        assert!(result.redirect.is_none());
        assert!(result.affected_users.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(store.usernames().unwrap(), vec!["alice", "bob"]);
    }

    #[test]
    fn invalid_username_is_an_error() {
        let store = store();
        let err = run(&store, "../bob", "/admin").unwrap_err();

        assert!(matches!(err, UserMgrError::InvalidUsername(_)));
    }
}
