//! Error types for SeatPlan

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum SpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Roster file error: {0}")]
    RosterFile(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias
pub type SpResult<T> = Result<T, SpError>;
