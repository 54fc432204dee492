use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// All loaded records, keyed (and therefore ordered) by username.
pub type Users = BTreeMap<String, UserRecord>;

/// A user account as read from its backing file.
///
/// The store does not interpret the account format beyond the username, which
/// always comes from the filename. Every other field is kept as-is so filter
/// expressions and renderers can reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_yaml::Value>,
}

impl UserRecord {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builds a record from parsed file fields. A `username` field inside the
    /// file is dropped: the filename is authoritative.
    pub fn from_fields(
        username: impl Into<String>,
        mut fields: BTreeMap<String, serde_yaml::Value>,
    ) -> Self {
        fields.remove("username");
        Self {
            username: username.into(),
            fields,
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<serde_yaml::Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&serde_yaml::Value> {
        self.fields.get(name)
    }

    /// String value of a field, if present and a string.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_str())
    }
}

/// How the listing page lays out user cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    #[default]
    Grid,
    List,
}

impl ListStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListStyle::Grid => "grid",
            ListStyle::List => "list",
        }
    }
}

impl fmt::Display for ListStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(ListStyle::Grid),
            "list" => Ok(ListStyle::List),
            other => Err(format!("Unknown list style: {}", other)),
        }
    }
}
