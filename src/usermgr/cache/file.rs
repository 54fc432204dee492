use super::CacheBackend;
use crate::error::{Result, UserMgrError};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// Cache entries stored as `<dir>/<key>.json`.
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl CacheBackend for FileCache {
    fn fetch(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(UserMgrError::Io)?;
        let value = serde_json::from_str(&content).map_err(UserMgrError::Serialization)?;
        Ok(Some(value))
    }

    fn save(&self, key: &str, value: serde_json::Value) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(UserMgrError::Io)?;
        }

        let content = serde_json::to_string(&value).map_err(UserMgrError::Serialization)?;

        // Atomic write
        let tmp_file = self.dir.join(format!(".cache-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(UserMgrError::Io)?;
        fs::rename(&tmp_file, self.entry_path(key)).map_err(UserMgrError::Io)?;

        Ok(())
    }
}
