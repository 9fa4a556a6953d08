use thiserror::Error;

/// Failure to read a display input as a finite decimal number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty numeric input")]
    Empty,

    #[error("Not a number: {0}")]
    NotANumber(String),

    #[error("Non-finite number: {0}")]
    NonFinite(String),
}

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Bridge error: {0}")]
    Bridge(String),
}

pub type DashResult<T> = Result<T, DashError>;

impl From<std::io::Error> for DashError {
    fn from(e: std::io::Error) -> Self {
        DashError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for DashError {
    fn from(e: serde_json::Error) -> Self {
        DashError::Serialization(e.to_string())
    }
}
