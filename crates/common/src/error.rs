//! Error types for SwiftTest

use thiserror::Error;

/// Result type alias using SwiftTest Error
pub type Result<T> = std::result::Result<T, Error>;

/// SwiftTest error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Sheet {sheet} not found! Available sheets: {}", available.join(", "))]
    SheetNotFound { sheet: String, available: Vec<String> },

    #[error("Workbook has no sheets: {0}")]
    EmptyWorkbook(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::InvalidConfig(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::InvalidConfig(e.to_string())
    }
}
