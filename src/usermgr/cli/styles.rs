//! Styles for the usermgr CLI.
//!
//! Templates only use the semantic names in [`names`]; the theme maps them to
//! actual colors and decorations. All styles are registered once through
//! `once_cell::sync::Lazy`.

use console::Style;
use once_cell::sync::Lazy;
use outstanding::{rgb_to_ansi256, Theme};

pub mod names {
    pub const USERNAME: &str = "username";
    pub const EMAIL: &str = "email";
    pub const LABEL: &str = "label";
    pub const MUTED: &str = "muted";
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
}

const GRAY: (u8, u8, u8) = (154, 154, 154);

pub static USERMGR_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add(names::USERNAME, Style::new().bold())
        .add(names::EMAIL, Style::new().cyan())
        .add(names::LABEL, Style::new().color256(rgb_to_ansi256(GRAY)))
        .add(
            names::MUTED,
            Style::new().color256(rgb_to_ansi256(GRAY)).italic(),
        )
        .add(names::INFO, Style::new().dim())
        .add(names::SUCCESS, Style::new().green())
        .add(names::WARNING, Style::new().yellow())
        .add(names::ERROR, Style::new().red())
});
