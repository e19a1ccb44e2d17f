//! Error types for harness operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    /// An external device command timed out, exited non-zero or could not start.
    #[error("Device command failed: {0}")]
    DeviceCommand(String),

    #[error("Invalid app field: '{field}'. Valid fields are: {valid}")]
    InvalidField { field: String, valid: String },

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Result not found: {0}")]
    ResultNotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
