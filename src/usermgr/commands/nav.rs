use crate::cache::CacheBackend;
use crate::error::Result;
use crate::store::backend::AccountBackend;
use crate::store::UserStore;
use serde::Serialize;

/// Permission a host must grant before showing the manager.
pub const REQUIRED_PERMISSION: &str = "admin_addon_user_manager.users";

/// Admin route the manager lives under.
pub const LOCATION: &str = "user-manager";

const LABEL: &str = "User Manager";
const ICON: &str = "fa-user";

/// Admin navigation item for the manager, badged with the account count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub label: String,
    pub location: String,
    pub icon: String,
    pub authorize: String,
    pub badge: Badge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub count: usize,
}

pub fn run<B: AccountBackend, C: CacheBackend>(store: &UserStore<B, C>) -> Result<NavEntry> {
    Ok(NavEntry {
        label: LABEL.to_string(),
        location: LOCATION.to_string(),
        icon: ICON.to_string(),
        authorize: REQUIRED_PERMISSION.to_string(),
        badge: Badge {
            count: store.count()?,
        },
    })
}
