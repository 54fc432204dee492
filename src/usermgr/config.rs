use crate::error::{Result, UserMgrError};
use crate::model::ListStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FILE_EXT: &str = ".yaml";
pub const DEFAULT_PER_PAGE: usize = 10;

/// Configuration for the user manager, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Layout used when a request does not ask for one
    #[serde(default)]
    pub default_list_style: ListStyle,

    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Fields offered by the "add user" form. Passed through to renderers untouched.
    #[serde(default = "default_add_user_fields")]
    pub add_user_fields: Vec<FieldSpec>,

    /// Directory holding one record file per account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts_dir: Option<PathBuf>,

    /// Extension of account record files (e.g. ".yaml")
    #[serde(default = "default_file_ext")]
    pub file_ext: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationConfig {
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One input of the account creation form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    fn new(name: &str, label: &str, kind: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: kind.to_string(),
            required,
        }
    }
}

fn default_file_ext() -> String {
    DEFAULT_FILE_EXT.to_string()
}

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

fn default_add_user_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("username", "Username", "text", true),
        FieldSpec::new("email", "Email", "email", true),
        FieldSpec::new("fullname", "Full name", "text", false),
        FieldSpec::new("password", "Password", "password", true),
    ]
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            default_list_style: ListStyle::default(),
            pagination: PaginationConfig::default(),
            add_user_fields: default_add_user_fields(),
            accounts_dir: None,
            file_ext: DEFAULT_FILE_EXT.to_string(),
        }
    }
}

impl ManagerConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(UserMgrError::Io)?;
        let mut config: ManagerConfig = serde_json::from_str(&content).map_err(|e| {
            UserMgrError::Config(format!("{}: {}", config_path.display(), e))
        })?;
        let ext = config.file_ext.clone();
        config.set_file_ext(&ext);
        Ok(config)
    }

    /// Rows per listing page. A zero in the file falls back to the default.
    pub fn per_page(&self) -> usize {
        if self.pagination.per_page == 0 {
            DEFAULT_PER_PAGE
        } else {
            self.pagination.per_page
        }
    }

    /// Set the record file extension (normalizes to start with a dot)
    pub fn set_file_ext(&mut self, ext: &str) {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
    }
}
