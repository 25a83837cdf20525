use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrepError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("unknown column: {0}")]
    MissingColumn(String),
    #[error("invalid option: {0}")]
    InvalidOption(String),
}

pub type Result<T> = std::result::Result<T, PrepError>;
