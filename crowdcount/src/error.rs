//! Error types for the crowd counting library

use thiserror::Error;

/// Result type alias for the crowd counting library
pub type Result<T> = std::result::Result<T, CounterError>;

/// Errors that can occur around the tracker
///
/// The tracker itself never fails; these come from its collaborators.
#[derive(Error, Debug)]
pub enum CounterError {
    #[error("Detection failed: {0}")]
    Detection(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tracking operator is not running")]
    OperatorDisconnected,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl CounterError {
    pub fn detection<S: Into<String>>(msg: S) -> Self {
        Self::Detection(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}
