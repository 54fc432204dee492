//! # CLI Layer
//!
//! One possible client for the user manager. This is the only place that
//! reads the environment, parses arguments, writes to stdout, and picks the
//! concrete backends.
//!
//! ## Path Resolution
//!
//! Each directory is taken from the first source that provides it:
//!
//! | directory | flag         | environment        | fallback                      |
//! |-----------|--------------|--------------------|-------------------------------|
//! | accounts  | `--accounts` | `USERMGR_ACCOUNTS` | `accounts_dir` in config.json |
//! | cache     | `--cache`    | `USERMGR_CACHE`    | platform cache dir            |
//! | config    | `--config`   | `USERMGR_CONFIG`   | platform config dir           |
//!
//! An accounts directory that resolves nowhere is not an error: the listing
//! is simply empty.

use super::render::{print_messages, render_listing, render_text_list};
use super::setup::{Cli, Commands, OutputFormat};
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;
use usermgr::api::{CmdMessage, ListRequest, Task, UserManager};
use usermgr::cache::file::FileCache;
use usermgr::config::ManagerConfig;
use usermgr::error::{Result, UserMgrError};
use usermgr::filter::jinja::JinjaEvaluator;
use usermgr::logging;
use usermgr::pagination::parse_page;
use usermgr::store::fs_backend::FsBackend;
use usermgr::store::UserStore;

pub const ACCOUNTS_ENV: &str = "USERMGR_ACCOUNTS";
pub const CACHE_ENV: &str = "USERMGR_CACHE";
pub const CONFIG_ENV: &str = "USERMGR_CONFIG";

struct AppContext {
    api: UserManager<FsBackend, FileCache, JinjaEvaluator>,
    use_color: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let ctx = init_context(&cli)?;

    match cli.command.unwrap_or_default() {
        Commands::List {
            filter,
            page,
            list_style,
            output,
        } => handle_list(&ctx, filter, page, list_style, output),
        Commands::Delete { username, referrer } => handle_delete(&ctx, &username, &referrer),
        Commands::Usernames => handle_usernames(&ctx),
        Commands::Nav => handle_nav(&ctx),
        Commands::Config => handle_config(&ctx),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let project_dirs = ProjectDirs::from("com", "usermgr", "usermgr");

    let config_dir = resolve_dir(
        cli.config.clone(),
        CONFIG_ENV,
        project_dirs.as_ref().map(|d| d.config_dir().to_path_buf()),
    )
    .ok_or_else(|| UserMgrError::Config("Could not determine config dir".to_string()))?;
    let config = ManagerConfig::load(&config_dir)?;

    let cache_dir = resolve_dir(
        cli.cache.clone(),
        CACHE_ENV,
        project_dirs.as_ref().map(|d| d.cache_dir().to_path_buf()),
    )
    .ok_or_else(|| UserMgrError::Config("Could not determine cache dir".to_string()))?;

    let accounts_dir = resolve_dir(cli.accounts.clone(), ACCOUNTS_ENV, config.accounts_dir.clone());
    debug!(
        config = %config_dir.display(),
        cache = %cache_dir.display(),
        accounts = ?accounts_dir,
        "resolved directories"
    );

    let backend = FsBackend::new(accounts_dir).with_file_ext(&config.file_ext);
    let store = UserStore::new(backend, FileCache::new(cache_dir));
    let api = UserManager::new(store, JinjaEvaluator::new(), config);

    let use_color = !cli.no_color && console::Term::stdout().features().colors_supported();

    Ok(AppContext { api, use_color })
}

/// Flag, then environment, then fallback. Empty environment values count as unset.
fn resolve_dir(flag: Option<PathBuf>, env_key: &str, fallback: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| {
        std::env::var_os(env_key)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
    .or(fallback)
}

fn handle_list(
    ctx: &AppContext,
    filter: String,
    page: Option<String>,
    list_style: Option<String>,
    output: OutputFormat,
) -> Result<()> {
    let request = ListRequest {
        filter,
        page: page.as_deref().and_then(parse_page),
        list_style,
    };
    let view = ctx.api.handle_request(&request)?;

    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&view).map_err(UserMgrError::Serialization)?;
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", render_listing(&view, ctx.use_color)),
    }
    Ok(())
}

fn handle_delete(ctx: &AppContext, username: &str, referrer: &str) -> Result<()> {
    let task = Task::DeleteUser {
        username: username.to_string(),
    };
    let mut result = ctx.api.handle_task(&task, referrer)?;
    if let Some(location) = result.redirect.clone() {
        result.add_message(CmdMessage::info(format!("Redirecting to {}", location)));
    }
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_usernames(ctx: &AppContext) -> Result<()> {
    let usernames = ctx.api.usernames()?;
    print!(
        "{}",
        render_text_list(&usernames, "No users found.", ctx.use_color)
    );
    Ok(())
}

fn handle_nav(ctx: &AppContext) -> Result<()> {
    let entry = ctx.api.nav()?;
    let json = serde_json::to_string_pretty(&entry).map_err(UserMgrError::Serialization)?;
    println!("{}", json);
    Ok(())
}

fn handle_config(ctx: &AppContext) -> Result<()> {
    let json =
        serde_json::to_string_pretty(ctx.api.config()).map_err(UserMgrError::Serialization)?;
    println!("{}", json);
    Ok(())
}
