//! # CLI Behavior
//!
//! This is **one possible UI client** for usermgr, not the application itself.
//! An admin panel would call the same [`usermgr::api::UserManager`] and render
//! the `ListView` with its own templates; the CLI renders it to the terminal.
//!
//! Running `usermgr` with no arguments defaults to `usermgr list`.
//!
//! `--output json` on `list` prints the listing view exactly as a host
//! renderer would receive it (camelCase keys, `filterException` only when the
//! filter failed).
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `render`: Output formatting
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal theme
//! - `templates`: Output templates

mod commands;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
