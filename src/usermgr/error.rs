use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserMgrError {
    #[error("Invalid username: {0:?}")]
    InvalidUsername(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Record format error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, UserMgrError>;
