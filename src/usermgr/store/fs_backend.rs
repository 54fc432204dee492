use super::backend::AccountBackend;
use super::validate_username;
use crate::error::{Result, UserMgrError};
use crate::model::UserRecord;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Account records stored as one YAML file per user: `<accounts>/<username>.yaml`.
pub struct FsBackend {
    accounts_dir: Option<PathBuf>,
    file_ext: String,
}

impl FsBackend {
    pub fn new(accounts_dir: Option<PathBuf>) -> Self {
        Self {
            accounts_dir,
            file_ext: ".yaml".to_string(),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    fn record_path(&self, username: &str) -> Option<PathBuf> {
        self.accounts_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}{}", username, self.file_ext)))
    }

    /// Hidden files and names that could not be deleted again are not accounts.
    fn username_from_filename(&self, name: &str) -> Option<String> {
        let stem = name.strip_suffix(self.file_ext.as_str())?.trim();
        validate_username(stem).ok()?;
        Some(stem.to_string())
    }
}

impl AccountBackend for FsBackend {
    fn directory_modified(&self) -> Result<Option<DateTime<Utc>>> {
        let Some(dir) = &self.accounts_dir else {
            return Ok(None);
        };
        let meta = match fs::metadata(dir) {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(UserMgrError::Io(e)),
        };
        if !meta.is_dir() {
            return Ok(None);
        }
        let modified: DateTime<Utc> = meta.modified().map_err(UserMgrError::Io)?.into();
        Ok(Some(modified))
    }

    fn list_usernames(&self) -> Result<Vec<String>> {
        let Some(dir) = &self.accounts_dir else {
            return Ok(Vec::new());
        };
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut usernames = Vec::new();
        for entry in fs::read_dir(dir).map_err(UserMgrError::Io)? {
            let entry = entry.map_err(UserMgrError::Io)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(username) = path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(|name| self.username_from_filename(name))
            {
                usernames.push(username);
            }
        }
        usernames.sort();
        Ok(usernames)
    }

    fn load(&self, username: &str) -> Result<Option<UserRecord>> {
        let Some(path) = self.record_path(username) else {
            return Ok(None);
        };
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(UserMgrError::Io(e)),
        };

        let fields =
            match serde_yaml::from_str::<Option<BTreeMap<String, serde_yaml::Value>>>(&content) {
                Ok(fields) => fields.unwrap_or_default(),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "unreadable account file, listing username only"
                    );
                    BTreeMap::new()
                }
            };

        Ok(Some(UserRecord::from_fields(username, fields)))
    }

    fn exists(&self, username: &str) -> bool {
        self.record_path(username)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }

    fn delete(&self, username: &str) -> Result<()> {
        if let Some(path) = self.record_path(username) {
            fs::remove_file(path).map_err(UserMgrError::Io)?;
        }
        Ok(())
    }
}
