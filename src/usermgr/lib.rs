//! # Usermgr Architecture
//!
//! Usermgr is the user-account manager of an admin panel: it lists the
//! accounts stored as one file each in an accounts directory, filters the list
//! with a user supplied expression, pages it, and deletes accounts. It is a
//! library that happens to have a CLI client; the host decides how to render.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders templates, handles terminal I/O│
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - UserManager: handle_request, handle_task, nav            │
//! │  - Returns ListView / CmdResult, never strings              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - list: store → filter → paginate                          │
//! │  - delete: remove account, answer with a redirect           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, cache/)                             │
//! │  - UserStore: memo + persisted snapshot keyed by dir mtime  │
//! │  - FsBackend/FileCache (production), Mem* (testing)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain arguments, returns `Result` types,
//! and never writes to stdout/stderr. Diagnostics go through `tracing`; only
//! the binary installs a subscriber (see [`logging`]).
//!
//! ## Module Overview
//!
//! - [`api`]: The facade every client goes through
//! - [`commands`]: Listing, delete task and navigation entry
//! - [`store`]: Account enumeration, loading, deletion and caching policy
//! - [`cache`]: Persisted cache contract and implementations
//! - [`filter`]: Expression filtering over loaded records
//! - [`pagination`]: Page slicing
//! - [`model`]: `UserRecord`, `Users`, `ListStyle`
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and templated rendering for the binary (not part of the lib API)

pub mod api;
pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod model;
pub mod pagination;
pub mod store;
