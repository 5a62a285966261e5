//! Error types for calquery.

use thiserror::Error;

/// Errors that can occur while reading the calendar store.
#[derive(Error, Debug)]
pub enum CalQueryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("Invalid query range: {0}")]
    InvalidRange(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for calquery operations.
pub type CalQueryResult<T> = Result<T, CalQueryError>;
