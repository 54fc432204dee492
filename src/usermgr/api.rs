//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point a host (the CLI here, an admin panel elsewhere) talks to.
//!
//! It dispatches to `commands/*.rs`, converts host-shaped input (tasks,
//! request parameters) into plain arguments, and returns structured types.
//! It never renders, never prints and never decides on exit codes.
//!
//! ## Generic Over Collaborators
//!
//! `UserManager<B, C, E>` owns the store (account backend `B` plus cache `C`)
//! and the filter evaluator `E`:
//! - Production: `UserManager<FsBackend, FileCache, JinjaEvaluator>`
//! - Testing: `UserManager<MemBackend, MemoryCache, _>`

use crate::cache::CacheBackend;
use crate::config::ManagerConfig;
use crate::error::Result;
use crate::filter::ExpressionEvaluator;
use crate::store::backend::AccountBackend;
use crate::store::UserStore;

pub use crate::commands::list::{ListRequest, ListView};
pub use crate::commands::nav::{Badge, NavEntry, LOCATION, REQUIRED_PERMISSION};
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

use crate::commands;

/// Tasks the manager can run on behalf of the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    DeleteUser { username: String },
}

pub struct UserManager<B: AccountBackend, C: CacheBackend, E: ExpressionEvaluator> {
    store: UserStore<B, C>,
    evaluator: E,
    config: ManagerConfig,
}

impl<B: AccountBackend, C: CacheBackend, E: ExpressionEvaluator> UserManager<B, C, E> {
    pub fn new(store: UserStore<B, C>, evaluator: E, config: ManagerConfig) -> Self {
        Self {
            store,
            evaluator,
            config,
        }
    }

    /// Build the listing view for one request.
    pub fn handle_request(&self, request: &ListRequest) -> Result<ListView> {
        commands::list::run(&self.store, &self.evaluator, &self.config, request)
    }

    /// Run a task. `referrer` is where the host should go once it succeeded.
    pub fn handle_task(&self, task: &Task, referrer: &str) -> Result<CmdResult> {
        match task {
            Task::DeleteUser { username } => {
                commands::delete::run(&self.store, username, referrer)
            }
        }
    }

    pub fn nav(&self) -> Result<NavEntry> {
        commands::nav::run(&self.store)
    }

    pub fn usernames(&self) -> Result<Vec<String>> {
        self.store.usernames()
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }
}
