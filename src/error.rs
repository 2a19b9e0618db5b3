use thiserror::Error;

pub type Result<T> = std::result::Result<T, TallyError>;

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("Git error: {0}")]
    Git(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
