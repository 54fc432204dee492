//! # Rendering Module
//!
//! Styled terminal output using the `outstanding` crate. Layout calculations
//! (column widths, truncation, padding) stay in Rust because they need
//! Unicode-aware processing; templates choose styles and arrange the pieces.

use super::styles::{names, USERMGR_THEME};
use super::templates::{GRID_TEMPLATE, LIST_TEMPLATE, MESSAGES_TEMPLATE, TEXT_LIST_TEMPLATE};
use outstanding::{render_with_color, ThemeChoice};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;
use usermgr::api::{CmdMessage, ListView, MessageLevel};
use usermgr::model::{ListStyle, UserRecord};

pub const USERNAME_WIDTH: usize = 20;
pub const EMAIL_WIDTH: usize = 32;
pub const FULLNAME_WIDTH: usize = 30;

const EMPTY_MESSAGE: &str = "No users found.";

/// Never shown, not even in the detailed layout.
const HIDDEN_FIELDS: &[&str] = &["password", "hashed_password"];

#[derive(Serialize)]
struct GridLine {
    username: String,
    username_pad: String,
    email: String,
    email_pad: String,
    fullname: String,
}

#[derive(Serialize)]
struct FieldLine {
    name: String,
    value: String,
}

#[derive(Serialize)]
struct UserBlock {
    username: String,
    fields: Vec<FieldLine>,
}

#[derive(Serialize)]
struct ListingData<T: Serialize> {
    users: Vec<T>,
    empty: bool,
    empty_message: &'static str,
    filter_error: Option<String>,
    footer: String,
}

#[derive(Serialize)]
struct TextListData {
    lines: Vec<String>,
    empty_message: String,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: String,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

/// Renders one listing page in the view's layout.
pub fn render_listing(view: &ListView, use_color: bool) -> String {
    let filter_error = view.filter_exception.as_ref().map(|e| e.to_string());
    let footer = footer(view);
    let empty = view.users.is_empty();

    let rendered = match view.list_style {
        ListStyle::Grid => {
            let data = ListingData {
                users: grid_lines(&view.users),
                empty,
                empty_message: EMPTY_MESSAGE,
                filter_error,
                footer,
            };
            render_with_color(
                GRID_TEMPLATE,
                &data,
                ThemeChoice::from(&*USERMGR_THEME),
                use_color,
            )
        }
        ListStyle::List => {
            let data = ListingData {
                users: view.users.iter().map(user_block).collect(),
                empty,
                empty_message: EMPTY_MESSAGE,
                filter_error,
                footer,
            };
            render_with_color(
                LIST_TEMPLATE,
                &data,
                ThemeChoice::from(&*USERMGR_THEME),
                use_color,
            )
        }
    };

    rendered.unwrap_or_else(|e| format!("Render error: {}\n", e))
}

pub fn render_text_list(lines: &[String], empty_message: &str, use_color: bool) -> String {
    let data = TextListData {
        lines: lines.to_vec(),
        empty_message: empty_message.to_string(),
    };

    render_with_color(
        TEXT_LIST_TEMPLATE,
        &data,
        ThemeChoice::from(&*USERMGR_THEME),
        use_color,
    )
    .unwrap_or_else(|_| format!("{}\n", empty_message))
}

/// Renders command messages using the template system with themed styles.
pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let message_data: Vec<MessageData> = messages
        .iter()
        .map(|msg| {
            let style = match msg.level {
                MessageLevel::Info => names::INFO,
                MessageLevel::Success => names::SUCCESS,
                MessageLevel::Warning => names::WARNING,
            };
            MessageData {
                content: msg.content.clone(),
                style: style.to_string(),
            }
        })
        .collect();

    let data = MessagesData {
        messages: message_data,
    };

    render_with_color(
        MESSAGES_TEMPLATE,
        &data,
        ThemeChoice::from(&*USERMGR_THEME),
        use_color,
    )
    .unwrap_or_else(|_| {
        messages
            .iter()
            .map(|m| format!("{}\n", m.content))
            .collect()
    })
}

pub fn print_messages(messages: &[CmdMessage], use_color: bool) {
    let output = render_messages(messages, use_color);
    if !output.is_empty() {
        print!("{}", output);
    }
}

fn footer(view: &ListView) -> String {
    let p = &view.pagination;
    let mut footer = if p.total == 0 {
        format!("Page {}/{}", p.current, p.count)
    } else {
        format!(
            "Page {}/{} · users {}-{} of {}",
            p.current,
            p.count,
            p.start_offset + 1,
            p.end_offset + 1,
            p.total
        )
    };
    if !view.filter.trim().is_empty() {
        footer.push_str(&format!(" · filter: {}", view.filter));
    }
    footer
}

fn grid_lines(users: &[UserRecord]) -> Vec<GridLine> {
    let cells: Vec<(String, String, String)> = users
        .iter()
        .map(|u| {
            (
                truncate_to_width(&u.username, USERNAME_WIDTH),
                truncate_to_width(&field_text(u, "email"), EMAIL_WIDTH),
                truncate_to_width(&field_text(u, "fullname"), FULLNAME_WIDTH),
            )
        })
        .collect();

    let username_col = cells.iter().map(|c| c.0.width()).max().unwrap_or(0);
    let email_col = cells.iter().map(|c| c.1.width()).max().unwrap_or(0);

    cells
        .into_iter()
        .map(|(username, email, fullname)| GridLine {
            username_pad: " ".repeat(username_col.saturating_sub(username.width())),
            email_pad: " ".repeat(email_col.saturating_sub(email.width())),
            username,
            email,
            fullname,
        })
        .collect()
}

fn user_block(user: &UserRecord) -> UserBlock {
    UserBlock {
        username: user.username.clone(),
        fields: user
            .fields
            .iter()
            .filter(|(name, _)| !HIDDEN_FIELDS.contains(&name.as_str()))
            .map(|(name, value)| FieldLine {
                name: name.clone(),
                value: value_text(value),
            })
            .collect(),
    }
}

fn field_text(user: &UserRecord, name: &str) -> String {
    user.field(name).map(value_text).unwrap_or_default()
}

/// One-line text for a record value.
fn value_text(value: &serde_yaml::Value) -> String {
    use serde_yaml::Value;

    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        Value::Mapping(_) => serde_json::to_string(value).unwrap_or_default(),
        Value::Tagged(tagged) => value_text(&tagged.value),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
