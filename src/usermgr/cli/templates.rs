//! # CLI Templates
//!
//! Terminal output goes through `outstanding` templates (minijinja syntax).
//! Templates live in stand-alone files under `templates/` so they are easy to
//! edit and diff, and are included here as string constants.
//!
//! Line breaks are explicit: every line a template emits ends inside the
//! block that produced it, so loops and conditionals never leave stray blank
//! lines. Layout math (widths, padding, truncation) happens in Rust; templates
//! only pick styles and arrange pre-computed pieces.

pub const GRID_TEMPLATE: &str = include_str!("templates/grid.tmp");
pub const LIST_TEMPLATE: &str = include_str!("templates/list.tmp");
pub const TEXT_LIST_TEMPLATE: &str = include_str!("templates/text_list.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
